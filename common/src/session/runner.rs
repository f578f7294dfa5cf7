use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::log;
use crate::session_rng::SessionRng;
use crate::tictactoe::{Difficulty, Position};

use super::{BotTurn, GameObserver, GameSession};

pub const DEFAULT_BOT_MOVE_DELAY: Duration = Duration::from_millis(500);

/// Inbound events from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    CellClicked(Position),
    ResetRequested,
    DifficultyChanged(Difficulty),
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub bot_move_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            bot_move_delay: DEFAULT_BOT_MOVE_DELAY,
            seed: None,
        }
    }
}

struct BotMove {
    generation: u64,
    position: Option<Position>,
}

/// Owns the session and serializes every state change until shutdown or until all senders are gone.
pub async fn run_session<O: GameObserver>(
    mut session: GameSession<O>,
    mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    settings: SessionSettings,
) -> GameSession<O> {
    let rng = match settings.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Session started: difficulty {}, computer delay {}ms, seed {}",
        session.difficulty(),
        settings.bot_move_delay.as_millis(),
        rng.seed()
    );
    let rng = Arc::new(Mutex::new(rng));
    let (bot_tx, mut bot_rx) = mpsc::unbounded_channel::<BotMove>();

    loop {
        tokio::select! {
            command = command_rx.recv() => {
                let Some(command) = command else {
                    break;
                };

                match command {
                    SessionCommand::CellClicked(position) => {
                        if let Some(turn) = session.handle_cell_clicked(position) {
                            schedule_bot_move(turn, settings.bot_move_delay, &rng, &bot_tx);
                        }
                    }
                    SessionCommand::ResetRequested => session.handle_reset(),
                    SessionCommand::DifficultyChanged(difficulty) => {
                        session.handle_difficulty_changed(difficulty)
                    }
                    SessionCommand::Shutdown => break,
                }
            }
            Some(bot_move) = bot_rx.recv() => {
                match bot_move.position {
                    Some(position) => {
                        if let Some(turn) = session.apply_bot_move(bot_move.generation, position) {
                            schedule_bot_move(turn, settings.bot_move_delay, &rng, &bot_tx);
                        }
                    }
                    None => log!("Computer found no move in generation {}", bot_move.generation),
                }
            }
        }
    }

    log!("Session finished after generation {}", session.generation());
    session
}

fn schedule_bot_move(
    turn: BotTurn,
    delay: Duration,
    rng: &Arc<Mutex<SessionRng>>,
    bot_tx: &mpsc::UnboundedSender<BotMove>,
) {
    let rng = Arc::clone(rng);
    let bot_tx = bot_tx.clone();

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let generation = turn.generation;
        let calculated_move = tokio::task::spawn_blocking(move || {
            let mut rng = match rng.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            turn.compute(&mut rng)
        })
        .await;

        match calculated_move {
            Ok(position) => {
                let _ = bot_tx.send(BotMove { generation, position });
            }
            Err(e) => log!("Computer move task failed: {}", e),
        }
    });
}
