use common::session::GameObserver;
use common::tictactoe::{Board, Difficulty, Mark, Position, WinningLine};

use crate::state::SharedState;

/// Mirrors session notifications into the state the window renders.
#[derive(Clone)]
pub struct LocalObserver {
    shared_state: SharedState,
}

impl LocalObserver {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl GameObserver for LocalObserver {
    fn on_board_changed(&self, position: Position, mark: Mark, status_text: &str) {
        self.shared_state.update_state(|state| {
            state.board.place(position, mark);
            state.status_text = status_text.to_string();
        });
    }

    fn on_game_over(&self, status_text: &str, winning_line: Option<WinningLine>) {
        self.shared_state.update_state(|state| {
            state.status_text = status_text.to_string();
            state.game_over_message = Some(status_text.to_string());
            state.winning_line = winning_line;
        });
    }

    fn on_reset(&self, status_text: &str) {
        self.shared_state.update_state(|state| {
            state.board = Board::new();
            state.status_text = status_text.to_string();
            state.game_over_message = None;
            state.winning_line = None;
        });
    }

    fn on_difficulty_changed(&self, difficulty: Difficulty) {
        self.shared_state
            .update_state(|state| state.difficulty = difficulty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewState;
    use common::session::GameSession;

    fn observed_session(difficulty: Difficulty) -> (GameSession<LocalObserver>, SharedState) {
        let shared_state = SharedState::new(ViewState::new(difficulty, "Player X's turn".to_string()));
        let session = GameSession::new(difficulty, LocalObserver::new(shared_state.clone()));
        (session, shared_state)
    }

    #[test]
    fn test_moves_are_mirrored_with_status() {
        let (mut session, shared_state) = observed_session(Difficulty::None);
        session.handle_cell_clicked(Position::new(2, 1));

        let state = shared_state.get_state();
        assert_eq!(state.board.get(Position::new(2, 1)), Mark::X);
        assert_eq!(state.status_text, "Player O's turn");
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_win_sets_message_and_line() {
        let (mut session, shared_state) = observed_session(Difficulty::None);
        for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
            session.handle_cell_clicked(Position::new(row, col));
        }

        let state = shared_state.get_state();
        assert_eq!(state.game_over_message.as_deref(), Some("Player X wins!"));
        assert_eq!(state.status_text, "Player X wins!");
        let line = state.winning_line.unwrap();
        assert!(line.contains(Position::new(0, 1)));
        assert_eq!(line.mark, Mark::X);
    }

    #[test]
    fn test_reset_clears_view() {
        let (mut session, shared_state) = observed_session(Difficulty::None);
        for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
            session.handle_cell_clicked(Position::new(row, col));
        }
        session.handle_reset();

        let state = shared_state.get_state();
        assert_eq!(state.board, Board::new());
        assert_eq!(state.status_text, "Player X's turn");
        assert!(state.game_over_message.is_none());
        assert!(state.winning_line.is_none());
    }

    #[test]
    fn test_difficulty_change_is_mirrored() {
        let (mut session, shared_state) = observed_session(Difficulty::None);
        session.handle_difficulty_changed(Difficulty::Medium);
        assert_eq!(shared_state.get_state().difficulty, Difficulty::Medium);
    }
}
