mod controller;
mod runner;

pub use controller::{BOT_MARK, BotTurn, GameSession};
pub use runner::{DEFAULT_BOT_MOVE_DELAY, SessionCommand, SessionSettings, run_session};

use crate::tictactoe::{Difficulty, Mark, Position, WinningLine};

/// Outbound notifications for whatever presents the game.
pub trait GameObserver: Send + Sync + 'static {
    fn on_board_changed(&self, position: Position, mark: Mark, status_text: &str);

    fn on_game_over(&self, status_text: &str, winning_line: Option<WinningLine>);

    fn on_reset(&self, status_text: &str);

    fn on_difficulty_changed(&self, _difficulty: Difficulty) {}
}
