use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use common::tictactoe::{Board, Difficulty, WinningLine};
use eframe::egui;

/// Everything the window needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub board: Board,
    pub status_text: String,
    pub game_over_message: Option<String>,
    pub winning_line: Option<WinningLine>,
    pub difficulty: Difficulty,
}

impl ViewState {
    pub fn new(difficulty: Difficulty, status_text: String) -> Self {
        Self {
            board: Board::new(),
            status_text,
            game_over_message: None,
            winning_line: None,
            difficulty,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over_message.is_some()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
pub struct SharedState {
    state: Arc<Mutex<ViewState>>,
    error: Arc<Mutex<Option<String>>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new(initial: ViewState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
            error: Arc::new(Mutex::new(None)),
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn get_state(&self) -> ViewState {
        lock(&self.state).clone()
    }

    pub fn update_state<F>(&self, change: F)
    where
        F: FnOnce(&mut ViewState),
    {
        change(&mut lock(&self.state));
        self.request_repaint();
    }

    pub fn set_error(&self, error: String) {
        *lock(&self.error) = Some(error);
        self.request_repaint();
    }

    pub fn get_error(&self) -> Option<String> {
        lock(&self.error).clone()
    }

    pub fn has_context(&self) -> bool {
        lock(&self.context).is_some()
    }

    pub fn set_context(&self, context: egui::Context) {
        *lock(&self.context) = Some(context);
    }

    fn request_repaint(&self) {
        if let Some(context) = lock(&self.context).as_ref() {
            context.request_repaint();
        }
    }
}
