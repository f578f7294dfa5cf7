use super::board::Board;
use super::types::{BOARD_SIZE, Mark, Position, WinningLine};

fn row_line(row: usize) -> [Position; BOARD_SIZE] {
    [Position::new(row, 0), Position::new(row, 1), Position::new(row, 2)]
}

fn column_line(col: usize) -> [Position; BOARD_SIZE] {
    [Position::new(0, col), Position::new(1, col), Position::new(2, col)]
}

const MAIN_DIAGONAL: [Position; BOARD_SIZE] = [
    Position { row: 0, col: 0 },
    Position { row: 1, col: 1 },
    Position { row: 2, col: 2 },
];

const ANTI_DIAGONAL: [Position; BOARD_SIZE] = [
    Position { row: 0, col: 2 },
    Position { row: 1, col: 1 },
    Position { row: 2, col: 0 },
];

fn completed_by(board: &Board, cells: [Position; BOARD_SIZE]) -> Option<WinningLine> {
    let mark = board.get(cells[0]);
    if mark == Mark::Empty {
        return None;
    }
    if cells.iter().all(|&cell| board.get(cell) == mark) {
        Some(WinningLine::new(mark, cells))
    } else {
        None
    }
}

/// Checks only the lines passing through `position`.
pub fn check_win_at(board: &Board, position: Position) -> Option<WinningLine> {
    if !position.is_on_board() || board.get(position) == Mark::Empty {
        return None;
    }

    let mut lines = vec![row_line(position.row), column_line(position.col)];
    if position.row == position.col {
        lines.push(MAIN_DIAGONAL);
    }
    if position.row + position.col == BOARD_SIZE - 1 {
        lines.push(ANTI_DIAGONAL);
    }

    lines.into_iter().find_map(|cells| completed_by(board, cells))
}

/// Scans all eight lines: rows and columns interleaved, then both diagonals.
pub fn check_win(board: &Board) -> Option<WinningLine> {
    for i in 0..BOARD_SIZE {
        if let Some(line) = completed_by(board, row_line(i)) {
            return Some(line);
        }
        if let Some(line) = completed_by(board, column_line(i)) {
            return Some(line);
        }
    }

    completed_by(board, MAIN_DIAGONAL).or_else(|| completed_by(board, ANTI_DIAGONAL))
}
