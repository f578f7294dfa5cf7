pub mod config;
pub mod logger;
pub mod session;
pub mod session_rng;
pub mod tictactoe;

pub use session_rng::SessionRng;
