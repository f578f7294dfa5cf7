mod config;
mod offline;
mod state;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use common::session::{SessionCommand, SessionSettings};
use common::tictactoe::{Difficulty, TicTacToeGameState};
use common::{log, logger};
use eframe::egui;
use tokio::sync::mpsc;

use state::{SharedState, ViewState};
use ui::TicTacToeApp;

#[derive(Parser, Debug)]
#[command(name = "tictactoe", about = "Tic-Tac-Toe against a friend or the computer")]
struct Args {
    /// Opponent to start with: none, easy, medium or hard. Overrides the saved choice.
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Path of the YAML config file.
    #[arg(long)]
    config: Option<String>,

    #[arg(long, default_value_t = false)]
    use_log_prefix: bool,

    /// Seed for the computer player's random choices.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = args.use_log_prefix.then(|| "TicTacToe".to_string());
    logger::init_logger(prefix);

    let config_path = args.config.unwrap_or_else(config::default_config_path);
    let config_manager = Arc::new(config::get_config_manager(&config_path));
    let config = config_manager.get_config()?;
    let difficulty = args.difficulty.unwrap_or(config.difficulty);
    log!("Using config {} with difficulty {}", config_path, difficulty);

    let shared_state = SharedState::new(ViewState::new(
        difficulty,
        TicTacToeGameState::new().status_text(),
    ));
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let settings = SessionSettings {
        bot_move_delay: Duration::from_millis(config.bot_move_delay_ms),
        seed: args.seed,
    };
    let game_thread =
        offline::spawn_local_game(shared_state.clone(), difficulty, command_rx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 520.0])
            .with_min_inner_size([200.0, 260.0])
            .with_title("Tic-Tac-Toe Game"),
        ..Default::default()
    };

    let app_command_tx = command_tx.clone();
    let remember_difficulty = config.remember_difficulty;
    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(TicTacToeApp::new(
                shared_state,
                app_command_tx,
                config_manager,
                remember_difficulty,
            )))
        }),
    )?;

    let _ = command_tx.send(SessionCommand::Shutdown);
    if game_thread.join().is_err() {
        log!("Game thread panicked");
    }

    Ok(())
}
