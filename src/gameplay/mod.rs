pub mod autopilot;
pub mod collaborators;
pub mod collision;
pub mod player;
pub mod progression;
pub mod session;
pub mod spawner;
pub mod track;

pub use collaborators::{
    AudioSink, Command, Cue, FrameCommands, FrameView, Host, NullHost, Presentation,
    RecordingHost, Screen, UiSink,
};
pub use session::{FrameOutcome, GameSession, RunSummary};
