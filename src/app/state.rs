use bevy::prelude::*;

/// Screen-level lifecycle. Mirrors the session flags:
/// Menu -> Running <-> Paused, Running -> GameOver -> Running | Menu.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Start screen; no run in progress.
    #[default]
    Menu,
    Running,
    Paused,
    /// Final score shown until the player restarts or leaves.
    GameOver,
}
