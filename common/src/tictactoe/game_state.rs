use std::fmt;

use super::board::Board;
use super::types::{CELL_COUNT, GameStatus, Mark, Position, WinningLine};
use super::win_detector::check_win_at;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
    OutOfBounds(Position),
    CellOccupied(Position),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "Game is already over"),
            MoveError::OutOfBounds(position) => write!(f, "Position {} is out of bounds", position),
            MoveError::CellOccupied(position) => write!(f, "Cell {} is already marked", position),
        }
    }
}

impl std::error::Error for MoveError {}

/// What a successful move changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub position: Position,
    pub mark: Mark,
    pub status: GameStatus,
    pub status_text: String,
}

impl MoveOutcome {
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }
}

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    current_mark: Mark,
    moves_count: usize,
    status: GameStatus,
    winning_line: Option<WinningLine>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::X,
            moves_count: 0,
            status: GameStatus::InProgress,
            winning_line: None,
        }
    }

    pub fn apply_move(&mut self, position: Position) -> Result<MoveOutcome, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }

        if !position.is_on_board() {
            return Err(MoveError::OutOfBounds(position));
        }

        let mark = self.current_mark;
        if !self.board.place(position, mark) {
            return Err(MoveError::CellOccupied(position));
        }
        self.moves_count += 1;

        if let Some(line) = check_win_at(&self.board, position) {
            self.status = GameStatus::Won(line.mark);
            self.winning_line = Some(line);
        } else if self.moves_count == CELL_COUNT {
            self.status = GameStatus::Draw;
        } else if let Some(next) = mark.opponent() {
            self.current_mark = next;
        }

        Ok(MoveOutcome {
            position,
            mark,
            status: self.status,
            status_text: self.status_text(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn moves_count(&self) -> usize {
        self.moves_count
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn status_text(&self) -> String {
        match self.status {
            GameStatus::InProgress => format!("Player {}'s turn", self.current_mark),
            GameStatus::Won(winner) => format!("Player {} wins!", winner),
            GameStatus::Draw => "Game ended in a tie!".to_string(),
        }
    }
}
