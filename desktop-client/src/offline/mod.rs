mod local_game;
mod observer;

pub use local_game::spawn_local_game;
pub use observer::LocalObserver;
