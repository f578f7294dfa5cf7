use super::types::{BOARD_SIZE, Mark, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from rows of `'X'`, `'O'` and anything else for empty.
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(BOARD_SIZE).enumerate() {
                board.cells[row][col] = match ch {
                    'X' | 'x' => Mark::X,
                    'O' | 'o' => Mark::O,
                    _ => Mark::Empty,
                };
            }
        }
        board
    }

    pub fn get(&self, position: Position) -> Mark {
        if !position.is_on_board() {
            return Mark::Empty;
        }
        self.cells[position.row][position.col]
    }

    /// Writes `mark` only into an empty on-board cell. Returns whether the write happened.
    pub fn place(&mut self, position: Position, mark: Mark) -> bool {
        if !position.is_on_board() || mark == Mark::Empty {
            return false;
        }
        let cell = &mut self.cells[position.row][position.col];
        if *cell != Mark::Empty {
            return false;
        }
        *cell = mark;
        true
    }

    pub(crate) fn clear(&mut self, position: Position) {
        if position.is_on_board() {
            self.cells[position.row][position.col] = Mark::Empty;
        }
    }

    pub fn rows(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn available_moves(&self) -> Vec<Position> {
        let mut moves = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Mark::Empty {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell != Mark::Empty)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }
}
