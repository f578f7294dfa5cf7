use std::sync::Arc;

use common::log;
use common::session::SessionCommand;
use common::tictactoe::Difficulty;
use eframe::egui;
use tokio::sync::mpsc;

use crate::config::ClientConfigManager;
use crate::state::SharedState;

use super::board::BoardView;

pub struct TicTacToeApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    config_manager: Arc<ClientConfigManager>,
    remember_difficulty: bool,
    board_view: BoardView,
    game_over_acknowledged: bool,
}

impl TicTacToeApp {
    pub fn new(
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<SessionCommand>,
        config_manager: Arc<ClientConfigManager>,
        remember_difficulty: bool,
    ) -> Self {
        Self {
            shared_state,
            command_tx,
            config_manager,
            remember_difficulty,
            board_view: BoardView::new(),
            game_over_acknowledged: false,
        }
    }

    fn send(&self, command: SessionCommand) {
        if self.command_tx.send(command).is_err() {
            log!("Game session is gone, dropped {:?}", command);
        }
    }

    fn change_difficulty(&self, difficulty: Difficulty) {
        self.send(SessionCommand::DifficultyChanged(difficulty));

        if !self.remember_difficulty {
            return;
        }
        if let Err(e) = self
            .config_manager
            .update(|config| config.difficulty = difficulty)
        {
            log!("Failed to save difficulty: {}", e);
        }
    }

    fn render_controls(&self, ui: &mut egui::Ui, current: Difficulty) {
        let mut selected = current;

        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Opponent")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for difficulty in Difficulty::ALL {
                        ui.selectable_value(&mut selected, difficulty, difficulty.label());
                    }
                });

            if ui.button("New Game").clicked() {
                self.send(SessionCommand::ResetRequested);
            }
        });

        if selected != current {
            self.change_difficulty(selected);
        }
    }

    fn render_game_over(&mut self, ctx: &egui::Context, message: &str) {
        let mut play_again = false;
        let mut close = false;

        egui::Window::new("Game Over")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(message);
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        play_again = ui.button("Play Again").clicked();
                        close = ui.button("Close").clicked();
                    });
                });
            });

        if play_again {
            self.send(SessionCommand::ResetRequested);
        }
        if play_again || close {
            self.game_over_acknowledged = true;
        }
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        let view = self.shared_state.get_state();
        if !view.is_game_over() {
            self.game_over_acknowledged = false;
        }

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(&view.status_text);
            });
            if let Some(error) = self.shared_state.get_error() {
                ui.colored_label(egui::Color32::RED, error);
            }
        });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_controls(ui, view.difficulty);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if let Some(position) = self.board_view.render(ui, &view) {
                    self.send(SessionCommand::CellClicked(position));
                }
            });
        });

        if let Some(message) = view.game_over_message.as_deref()
            && !self.game_over_acknowledged
        {
            self.render_game_over(ctx, message);
        }
    }
}
