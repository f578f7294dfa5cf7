mod board;
mod bot;
mod game_state;
mod types;
mod win_detector;

pub use board::Board;
pub use bot::{BotInput, calculate_move, select_move};
pub use game_state::{MoveError, MoveOutcome, TicTacToeGameState};
pub use types::{BOARD_SIZE, CELL_COUNT, Difficulty, GameStatus, Mark, Position, WinningLine};
pub use win_detector::{check_win, check_win_at};
