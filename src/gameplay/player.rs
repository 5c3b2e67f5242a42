//! Player state machine: lane position with eased lateral motion, plus the
//! Running / Jumping / Sliding vertical states driven by the injected clock.

use std::f32::consts::PI;
use std::time::Duration;

use crate::core::components::{Lane, LaneLayout, VerticalState};
use crate::core::config::PlayerConfig;

/// Per-frame pose handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerPose {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub scale_y: f32,
    /// Roll (rotation about z) from the running bob.
    pub tilt: f32,
    /// Constant forward pitch.
    pub lean: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub lane: Lane,
    pub target_x: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub vertical: VerticalState,
    pub scale_y: f32,
    pub tilt: f32,
    lean: f32,
    run_phase: f32,
}

impl Player {
    pub fn new(cfg: &PlayerConfig, lanes: &LaneLayout) -> Self {
        let lane = lanes.clamp(cfg.start_lane);
        let x = lanes.center_x(lane);
        Self {
            lane,
            target_x: x,
            x,
            y: cfg.base_height,
            z: cfg.z,
            vertical: VerticalState::Running,
            scale_y: 1.0,
            tilt: 0.0,
            lean: cfg.lean,
            run_phase: 0.0,
        }
    }

    pub fn reset(&mut self, cfg: &PlayerConfig, lanes: &LaneLayout) {
        *self = Self::new(cfg, lanes);
    }

    /// Returns false (and changes nothing) at the leftmost lane.
    pub fn move_left(&mut self, lanes: &LaneLayout) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.lane -= 1;
        self.target_x = lanes.center_x(self.lane);
        true
    }

    /// Returns false (and changes nothing) at the rightmost lane.
    pub fn move_right(&mut self, lanes: &LaneLayout) -> bool {
        if self.lane >= lanes.last() {
            return false;
        }
        self.lane += 1;
        self.target_x = lanes.center_x(self.lane);
        true
    }

    /// Starts a jump from Running only.
    pub fn jump(&mut self, now: Duration) -> bool {
        if !self.vertical.is_running() {
            return false;
        }
        self.vertical = VerticalState::Jumping { since: now };
        true
    }

    /// Starts a slide from Running only.
    pub fn slide(&mut self, now: Duration) -> bool {
        if !self.vertical.is_running() {
            return false;
        }
        self.vertical = VerticalState::Sliding { since: now };
        true
    }

    pub fn update(&mut self, now: Duration, cfg: &PlayerConfig) {
        self.x += (self.target_x - self.x) * cfg.lateral_ease;

        match self.vertical {
            VerticalState::Jumping { since } => {
                let duration = Duration::from_millis(cfg.jump_duration_ms);
                let elapsed = now.saturating_sub(since);
                if elapsed >= duration {
                    self.y = cfg.base_height;
                    self.vertical = VerticalState::Running;
                } else {
                    let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
                    self.y = cfg.base_height + (progress * PI).sin() * cfg.jump_height;
                }
            }
            VerticalState::Sliding { since } => {
                let duration = Duration::from_millis(cfg.slide_duration_ms);
                if now.saturating_sub(since) >= duration {
                    self.scale_y = 1.0;
                    self.y = cfg.base_height;
                    self.vertical = VerticalState::Running;
                } else {
                    self.scale_y = cfg.slide_scale;
                    self.y = cfg.slide_height;
                }
            }
            VerticalState::Running => {}
        }

        self.run_phase += cfg.bob_step;
        if self.vertical.is_running() {
            self.tilt = self.run_phase.sin() * cfg.tilt_amplitude;
            self.y = cfg.base_height + (self.run_phase * 2.0).sin() * cfg.bob_amplitude;
        }
    }

    pub fn pose(&self) -> PlayerPose {
        PlayerPose {
            x: self.x,
            y: self.y,
            z: self.z,
            scale_y: self.scale_y,
            tilt: self.tilt,
            lean: self.lean,
        }
    }
}
