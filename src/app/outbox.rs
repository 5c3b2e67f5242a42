//! ECS-side host for the session: collaborator calls are queued here during
//! the simulation step and drained by the presentation, audio and UI systems.

use bevy::prelude::*;

use crate::audio::scheduler::AudioRequest;
use crate::core::components::{Lane, ObstacleKind, VisualHandle};
use crate::gameplay::player::PlayerPose;
use crate::gameplay::track::RecycledSegment;
use crate::gameplay::{AudioSink, Cue, FrameView, Presentation, Screen, UiSink};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualRequest {
    SpawnObstacle {
        handle: VisualHandle,
        kind: ObstacleKind,
        lane: Lane,
        z: f32,
    },
    SpawnCoin {
        handle: VisualHandle,
        lane: Lane,
        z: f32,
    },
    Remove(VisualHandle),
    PlayCollect(VisualHandle),
}

/// Positions of every live visual at the end of the last simulated frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub player: PlayerPose,
    /// `(handle, x, z)`
    pub obstacles: Vec<(VisualHandle, f32, f32)>,
    pub coins: Vec<(VisualHandle, f32, f32)>,
    /// `(handle, x, z, progress)`
    pub bursts: Vec<(VisualHandle, f32, f32, f32)>,
}

#[derive(Resource, Debug, Default)]
pub struct HostOutbox {
    next_handle: u64,
    pub visuals: Vec<VisualRequest>,
    pub audio: Vec<AudioRequest>,
    /// Latest requested screen, consumed by the state bridge.
    pub screen: Option<Screen>,
    pub score: u64,
    pub coins: u32,
    /// Segment z positions by pool index.
    pub segment_z: Vec<f32>,
    pub snapshot: Option<RenderSnapshot>,
}

impl HostOutbox {
    fn allocate(&mut self) -> VisualHandle {
        self.next_handle += 1;
        VisualHandle(self.next_handle)
    }
}

impl Presentation for HostOutbox {
    fn spawn_obstacle_visual(&mut self, kind: ObstacleKind, lane: Lane, z: f32) -> VisualHandle {
        let handle = self.allocate();
        self.visuals.push(VisualRequest::SpawnObstacle {
            handle,
            kind,
            lane,
            z,
        });
        handle
    }

    fn spawn_coin_visual(&mut self, lane: Lane, z: f32) -> VisualHandle {
        let handle = self.allocate();
        self.visuals
            .push(VisualRequest::SpawnCoin { handle, lane, z });
        handle
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        self.visuals.push(VisualRequest::Remove(handle));
    }

    fn play_collect_animation(&mut self, handle: VisualHandle) {
        self.visuals.push(VisualRequest::PlayCollect(handle));
    }

    fn advance_segment_pool(&mut self, segments: &[RecycledSegment]) {
        self.segment_z.clear();
        self.segment_z.extend(segments.iter().map(|s| s.z));
    }

    fn render_frame(&mut self, view: &FrameView<'_>) {
        let lanes = view.lanes;
        self.snapshot = Some(RenderSnapshot {
            frame: view.frame,
            player: view.player,
            obstacles: view
                .obstacles
                .iter()
                .map(|o| (o.visual, lanes.center_x(o.lane), o.z))
                .collect(),
            coins: view
                .coins
                .iter()
                .map(|c| (c.visual, lanes.center_x(c.lane), c.z))
                .collect(),
            bursts: view
                .bursts
                .iter()
                .map(|b| (b.visual, lanes.center_x(b.lane), b.z, b.progress))
                .collect(),
        });
    }
}

impl AudioSink for HostOutbox {
    fn cue(&mut self, cue: Cue) {
        self.audio.push(AudioRequest::Cue(cue));
    }
    fn start_ambient_loop(&mut self) {
        self.audio.push(AudioRequest::StartAmbient);
    }
    fn stop_ambient_loop(&mut self) {
        self.audio.push(AudioRequest::StopAmbient);
    }
}

impl UiSink for HostOutbox {
    fn report_score(&mut self, score: u64) {
        self.score = score;
    }
    fn report_coins(&mut self, coins: u32) {
        self.coins = coins;
    }
    fn show_screen(&mut self, screen: Screen) {
        self.screen = Some(screen);
    }
}
