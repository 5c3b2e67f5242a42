//! Seams between the simulation core and the outside world: presentation,
//! audio, UI, and the per-frame command set fed by input.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::core::components::{
    Coin, CoinBurst, GameState, Lane, LaneLayout, Obstacle, ObstacleKind, VisualHandle,
};
use crate::gameplay::player::PlayerPose;
use crate::gameplay::track::RecycledSegment;

/// Sound effects requested by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cue {
    Jump,
    Slide,
    Coin,
    LaneSwitch,
    GameOver,
    Start,
    Milestone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Start,
    GameOver,
    Pause,
    /// No overlay; gameplay is visible.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
    Slide,
    Pause,
}

impl Command {
    /// Processing order within a frame.
    pub const ALL: [Command; 5] = [
        Self::Pause,
        Self::MoveLeft,
        Self::MoveRight,
        Self::Jump,
        Self::Slide,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MoveLeft" | "move_left" => Some(Self::MoveLeft),
            "MoveRight" | "move_right" => Some(Self::MoveRight),
            "Jump" | "jump" => Some(Self::Jump),
            "Slide" | "slide" => Some(Self::Slide),
            "Pause" | "pause" => Some(Self::Pause),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Commands collected for one frame; each kind at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FrameCommands(u8);

impl FrameCommands {
    pub fn insert(&mut self, cmd: Command) {
        self.0 |= cmd.bit();
    }

    pub fn with(mut self, cmd: Command) -> Self {
        self.insert(cmd);
        self
    }

    pub fn contains(&self, cmd: Command) -> bool {
        self.0 & cmd.bit() != 0
    }

    pub fn remove(&mut self, cmd: Command) {
        self.0 &= !cmd.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterates in [`Command::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        Command::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Command> for FrameCommands {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl Extend<Command> for FrameCommands {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        for cmd in iter {
            self.insert(cmd);
        }
    }
}

/// Read-only snapshot handed to [`Presentation::render_frame`].
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub frame: u64,
    pub player: PlayerPose,
    pub lanes: LaneLayout,
    pub obstacles: &'a [Obstacle],
    pub coins: &'a [Coin],
    pub bursts: &'a [CoinBurst],
    pub state: &'a GameState,
}

pub trait Presentation {
    fn spawn_obstacle_visual(&mut self, kind: ObstacleKind, lane: Lane, z: f32) -> VisualHandle;
    fn spawn_coin_visual(&mut self, lane: Lane, z: f32) -> VisualHandle;
    fn remove_visual(&mut self, handle: VisualHandle);
    fn play_collect_animation(&mut self, handle: VisualHandle);
    fn advance_segment_pool(&mut self, segments: &[RecycledSegment]);
    fn render_frame(&mut self, view: &FrameView<'_>);
}

pub trait AudioSink {
    fn cue(&mut self, cue: Cue);
    /// Idempotent while a loop is already running.
    fn start_ambient_loop(&mut self);
    /// Also cancels any scheduled continuation of the loop.
    fn stop_ambient_loop(&mut self);
}

pub trait UiSink {
    fn report_score(&mut self, score: u64);
    fn report_coins(&mut self, coins: u32);
    fn show_screen(&mut self, screen: Screen);
}

/// Everything the session talks to.
pub trait Host: Presentation + AudioSink + UiSink {}

impl<T: Presentation + AudioSink + UiSink + ?Sized> Host for T {}

/// Hands out handles and ignores everything else.
#[derive(Debug, Default)]
pub struct NullHost {
    next: u64,
}

impl Presentation for NullHost {
    fn spawn_obstacle_visual(&mut self, _: ObstacleKind, _: Lane, _: f32) -> VisualHandle {
        self.next += 1;
        VisualHandle(self.next)
    }
    fn spawn_coin_visual(&mut self, _: Lane, _: f32) -> VisualHandle {
        self.next += 1;
        VisualHandle(self.next)
    }
    fn remove_visual(&mut self, _: VisualHandle) {}
    fn play_collect_animation(&mut self, _: VisualHandle) {}
    fn advance_segment_pool(&mut self, _: &[RecycledSegment]) {}
    fn render_frame(&mut self, _: &FrameView<'_>) {}
}

impl AudioSink for NullHost {
    fn cue(&mut self, _: Cue) {}
    fn start_ambient_loop(&mut self) {}
    fn stop_ambient_loop(&mut self) {}
}

impl UiSink for NullHost {
    fn report_score(&mut self, _: u64) {}
    fn report_coins(&mut self, _: u32) {}
    fn show_screen(&mut self, _: Screen) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnedVisual {
    Obstacle {
        kind: ObstacleKind,
        lane: Lane,
        z: f32,
    },
    Coin {
        lane: Lane,
        z: f32,
    },
}

/// Records every request; used by tests and the headless runner.
#[derive(Debug, Default)]
pub struct RecordingHost {
    next: u64,
    pub spawned: Vec<(VisualHandle, SpawnedVisual)>,
    pub removed: Vec<VisualHandle>,
    pub collect_animations: Vec<VisualHandle>,
    pub segment_updates: u64,
    pub frames_rendered: u64,
    pub cues: Vec<Cue>,
    pub ambient_starts: u32,
    pub ambient_stops: u32,
    pub ambient_running: bool,
    pub last_score: Option<u64>,
    pub last_coins: Option<u32>,
    pub screens: Vec<Screen>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cue_count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }

    pub fn cue_histogram(&self) -> HashMap<Cue, usize> {
        let mut map = HashMap::new();
        for cue in &self.cues {
            *map.entry(*cue).or_insert(0) += 1;
        }
        map
    }

    pub fn last_screen(&self) -> Option<Screen> {
        self.screens.last().copied()
    }

    /// Spawned visuals not yet removed.
    pub fn live_visuals(&self) -> usize {
        self.spawned.len().saturating_sub(self.removed.len())
    }

    fn next_handle(&mut self) -> VisualHandle {
        self.next += 1;
        VisualHandle(self.next)
    }
}

impl Presentation for RecordingHost {
    fn spawn_obstacle_visual(&mut self, kind: ObstacleKind, lane: Lane, z: f32) -> VisualHandle {
        let handle = self.next_handle();
        self.spawned
            .push((handle, SpawnedVisual::Obstacle { kind, lane, z }));
        handle
    }
    fn spawn_coin_visual(&mut self, lane: Lane, z: f32) -> VisualHandle {
        let handle = self.next_handle();
        self.spawned.push((handle, SpawnedVisual::Coin { lane, z }));
        handle
    }
    fn remove_visual(&mut self, handle: VisualHandle) {
        self.removed.push(handle);
    }
    fn play_collect_animation(&mut self, handle: VisualHandle) {
        self.collect_animations.push(handle);
    }
    fn advance_segment_pool(&mut self, _: &[RecycledSegment]) {
        self.segment_updates += 1;
    }
    fn render_frame(&mut self, _: &FrameView<'_>) {
        self.frames_rendered += 1;
    }
}

impl AudioSink for RecordingHost {
    fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
    fn start_ambient_loop(&mut self) {
        if !self.ambient_running {
            self.ambient_running = true;
            self.ambient_starts += 1;
        }
    }
    fn stop_ambient_loop(&mut self) {
        if self.ambient_running {
            self.ambient_running = false;
            self.ambient_stops += 1;
        }
    }
}

impl UiSink for RecordingHost {
    fn report_score(&mut self, score: u64) {
        self.last_score = Some(score);
    }
    fn report_coins(&mut self, coins: u32) {
        self.last_coins = Some(coins);
    }
    fn show_screen(&mut self, screen: Screen) {
        self.screens.push(screen);
    }
}
