pub mod config;

pub use config::{
    AudioConfig, CoinRunConfig, CollisionConfig, PlayerConfig, RunnerConfig, ScoringConfig,
    SpawnConfig, SpeedConfig, TrackConfig, WindowConfig,
};
