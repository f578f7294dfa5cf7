use std::thread::JoinHandle;

use common::log;
use common::session::{GameSession, SessionCommand, SessionSettings, run_session};
use common::tictactoe::Difficulty;
use tokio::sync::mpsc;

use crate::state::SharedState;

use super::LocalObserver;

/// Runs the session on its own tokio runtime so the UI thread never blocks on the computer player.
pub fn spawn_local_game(
    shared_state: SharedState,
    difficulty: Difficulty,
    command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    settings: SessionSettings,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                log!("Failed to start game runtime: {}", e);
                shared_state.set_error(format!("Failed to start game: {}", e));
                return;
            }
        };

        runtime.block_on(async move {
            let session = GameSession::new(difficulty, LocalObserver::new(shared_state));
            let session = run_session(session, command_rx, settings).await;
            log!(
                "Local game stopped with {} moves on the board",
                session.state().moves_count()
            );
        });
    })
}
