pub mod game;
pub mod outbox;
pub mod screens;
pub mod session;
pub mod state;
