pub mod app;
pub mod audio;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::{GamePlugin, RunnerCorePlugin};
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::config::{config::RunnerConfig, config::WindowConfig};
pub use crate::gameplay::{FrameCommands, FrameOutcome, GameSession, RunSummary};
