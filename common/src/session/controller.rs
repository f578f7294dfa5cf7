use crate::log;
use crate::session_rng::SessionRng;
use crate::tictactoe::{BotInput, Difficulty, Mark, Position, TicTacToeGameState, calculate_move};

use super::GameObserver;

/// The computer always plays O; the human opens as X.
pub const BOT_MARK: Mark = Mark::O;

/// A computer move that is due, tagged with the game generation it was scheduled in.
#[derive(Debug, Clone, Copy)]
pub struct BotTurn {
    pub generation: u64,
    pub difficulty: Difficulty,
    pub input: BotInput,
}

impl BotTurn {
    pub fn compute(&self, rng: &mut SessionRng) -> Option<Position> {
        calculate_move(self.difficulty, self.input, rng)
    }
}

pub struct GameSession<O: GameObserver> {
    state: TicTacToeGameState,
    difficulty: Difficulty,
    generation: u64,
    observer: O,
}

impl<O: GameObserver> GameSession<O> {
    pub fn new(difficulty: Difficulty, observer: O) -> Self {
        Self {
            state: TicTacToeGameState::new(),
            difficulty,
            generation: 0,
            observer,
        }
    }

    pub fn state(&self) -> &TicTacToeGameState {
        &self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Bumped by every reset; computer moves from an older generation are discarded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_bot_turn(&self) -> bool {
        self.difficulty.has_bot()
            && !self.state.is_over()
            && self.state.current_mark() == BOT_MARK
    }

    pub fn handle_cell_clicked(&mut self, position: Position) -> Option<BotTurn> {
        if self.state.is_over() {
            log!("Ignoring click at {}: game is over", position);
            return None;
        }

        if self.is_bot_turn() {
            log!("Ignoring click at {}: computer is to move", position);
            return None;
        }

        self.play(position)
    }

    pub fn handle_reset(&mut self) {
        self.state.reset();
        self.generation += 1;
        log!("Game reset (generation {})", self.generation);
        self.observer.on_reset(&self.state.status_text());
    }

    pub fn handle_difficulty_changed(&mut self, difficulty: Difficulty) {
        log!("Difficulty changed: {} -> {}", self.difficulty, difficulty);
        self.difficulty = difficulty;
        self.observer.on_difficulty_changed(difficulty);

        if !self.state.is_over() {
            self.handle_reset();
        }
    }

    pub fn apply_bot_move(&mut self, generation: u64, position: Position) -> Option<BotTurn> {
        if generation != self.generation {
            log!(
                "Dropping stale computer move {} from generation {} (current {})",
                position,
                generation,
                self.generation
            );
            return None;
        }

        if !self.is_bot_turn() {
            log!("Dropping computer move {}: not the computer's turn", position);
            return None;
        }

        self.play(position)
    }

    fn play(&mut self, position: Position) -> Option<BotTurn> {
        let outcome = match self.state.apply_move(position) {
            Ok(outcome) => outcome,
            Err(e) => {
                log!("Ignored move {}: {}", position, e);
                return None;
            }
        };

        log!("{} played {}", outcome.mark, position);
        self.observer
            .on_board_changed(position, outcome.mark, &outcome.status_text);

        if outcome.is_terminal() {
            log!("Game over: {}", outcome.status_text);
            self.observer
                .on_game_over(&outcome.status_text, self.state.winning_line());
            return None;
        }

        self.pending_bot_turn()
    }

    fn pending_bot_turn(&self) -> Option<BotTurn> {
        if !self.is_bot_turn() {
            return None;
        }

        Some(BotTurn {
            generation: self.generation,
            difficulty: self.difficulty,
            input: BotInput::from_game_state(&self.state),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::tictactoe::{GameStatus, WinningLine};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Event {
        BoardChanged(Position, Mark, String),
        GameOver(String, Option<WinningLine>),
        Reset(String),
        DifficultyChanged(Difficulty),
    }

    #[derive(Clone, Default)]
    pub(crate) struct RecordingObserver {
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl RecordingObserver {
        pub(crate) fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl GameObserver for RecordingObserver {
        fn on_board_changed(&self, position: Position, mark: Mark, status_text: &str) {
            self.push(Event::BoardChanged(position, mark, status_text.to_string()));
        }

        fn on_game_over(&self, status_text: &str, winning_line: Option<WinningLine>) {
            self.push(Event::GameOver(status_text.to_string(), winning_line));
        }

        fn on_reset(&self, status_text: &str) {
            self.push(Event::Reset(status_text.to_string()));
        }

        fn on_difficulty_changed(&self, difficulty: Difficulty) {
            self.push(Event::DifficultyChanged(difficulty));
        }
    }

    fn session(difficulty: Difficulty) -> (GameSession<RecordingObserver>, RecordingObserver) {
        let observer = RecordingObserver::default();
        (GameSession::new(difficulty, observer.clone()), observer)
    }

    #[test]
    fn test_two_player_scenario_ends_with_top_row_win() {
        let (mut session, observer) = session(Difficulty::None);
        for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
            assert!(session.handle_cell_clicked(Position::new(row, col)).is_none());
        }

        assert_eq!(session.state().status(), GameStatus::Won(Mark::X));
        let events = observer.events();
        assert_eq!(events.len(), 6);
        assert_eq!(
            events[0],
            Event::BoardChanged(Position::new(0, 0), Mark::X, "Player O's turn".to_string())
        );
        assert_eq!(
            events[4],
            Event::BoardChanged(Position::new(0, 2), Mark::X, "Player X wins!".to_string())
        );
        match &events[5] {
            Event::GameOver(text, Some(line)) => {
                assert_eq!(text, "Player X wins!");
                assert_eq!(line.start(), Position::new(0, 0));
                assert_eq!(line.end(), Position::new(0, 2));
            }
            other => panic!("unexpected event {:?}", other),
        }

        session.handle_cell_clicked(Position::new(2, 0));
        assert_eq!(observer.events().len(), 6);
        assert_eq!(session.state().moves_count(), 5);
    }

    #[test]
    fn test_illegal_click_emits_nothing() {
        let (mut session, observer) = session(Difficulty::None);
        session.handle_cell_clicked(Position::new(1, 1));
        session.handle_cell_clicked(Position::new(1, 1));
        session.handle_cell_clicked(Position::new(3, 3));
        assert_eq!(observer.events().len(), 1);
        assert_eq!(session.state().moves_count(), 1);
    }

    #[test]
    fn test_human_move_hands_turn_to_computer() {
        let (mut session, _observer) = session(Difficulty::Hard);
        let turn = session.handle_cell_clicked(Position::new(0, 0)).unwrap();
        assert_eq!(turn.generation, 0);
        assert_eq!(turn.difficulty, Difficulty::Hard);
        assert_eq!(turn.input.current_mark, BOT_MARK);
        assert!(session.is_bot_turn());

        let position = turn.compute(&mut SessionRng::new(1)).unwrap();
        assert!(session.apply_bot_move(turn.generation, position).is_none());
        assert_eq!(session.state().moves_count(), 2);
        assert_eq!(session.state().current_mark(), Mark::X);
    }

    #[test]
    fn test_clicks_on_computer_turn_are_ignored() {
        let (mut session, observer) = session(Difficulty::Easy);
        session.handle_cell_clicked(Position::new(0, 0));
        assert!(session.handle_cell_clicked(Position::new(1, 1)).is_none());
        assert_eq!(session.state().moves_count(), 1);
        assert_eq!(observer.events().len(), 1);
    }

    #[test]
    fn test_stale_computer_move_is_dropped_after_reset() {
        let (mut session, observer) = session(Difficulty::Medium);
        let turn = session.handle_cell_clicked(Position::new(0, 0)).unwrap();
        session.handle_reset();
        // Same cells are playable again, only the generation tells the moves apart.
        session.handle_cell_clicked(Position::new(0, 0));

        assert!(session.apply_bot_move(turn.generation, Position::new(1, 1)).is_none());
        assert_eq!(session.state().moves_count(), 1);
        assert!(session.is_bot_turn());
        assert!(!observer
            .events()
            .iter()
            .any(|e| matches!(e, Event::BoardChanged(_, Mark::O, _))));

        session.apply_bot_move(session.generation(), Position::new(1, 1));
        assert_eq!(session.state().moves_count(), 2);
    }

    #[test]
    fn test_computer_move_rejected_when_not_its_turn() {
        let (mut session, _observer) = session(Difficulty::Easy);
        session.apply_bot_move(0, Position::new(1, 1));
        assert_eq!(session.state().moves_count(), 0);
    }

    #[test]
    fn test_reset_restores_board_and_notifies() {
        let (mut session, observer) = session(Difficulty::None);
        session.handle_cell_clicked(Position::new(2, 2));
        session.handle_reset();

        assert_eq!(session.state().moves_count(), 0);
        assert_eq!(session.state().current_mark(), Mark::X);
        assert_eq!(session.generation(), 1);
        assert_eq!(
            observer.events().last(),
            Some(&Event::Reset("Player X's turn".to_string()))
        );
    }

    #[test]
    fn test_difficulty_change_mid_game_resets() {
        let (mut session, observer) = session(Difficulty::None);
        session.handle_cell_clicked(Position::new(0, 0));
        session.handle_difficulty_changed(Difficulty::Hard);

        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(session.state().moves_count(), 0);
        let events = observer.events();
        assert_eq!(events[1], Event::DifficultyChanged(Difficulty::Hard));
        assert!(matches!(events[2], Event::Reset(_)));
    }

    #[test]
    fn test_difficulty_change_after_game_over_keeps_board() {
        let (mut session, observer) = session(Difficulty::None);
        for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
            session.handle_cell_clicked(Position::new(row, col));
        }
        session.handle_difficulty_changed(Difficulty::Easy);

        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert!(session.state().is_over());
        assert_eq!(session.state().moves_count(), 5);
        assert_eq!(session.generation(), 0);
        assert!(!observer.events().iter().any(|e| matches!(e, Event::Reset(_))));
    }

    #[test]
    fn test_draw_reports_game_over_without_line() {
        let (mut session, observer) = session(Difficulty::None);
        for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)] {
            session.handle_cell_clicked(Position::new(row, col));
        }
        assert_eq!(session.state().status(), GameStatus::Draw);
        assert_eq!(
            observer.events().last(),
            Some(&Event::GameOver("Game ended in a tie!".to_string(), None))
        );
    }
}
