use bevy::prelude::*;

use crate::app::session::ActiveSession;

#[derive(Resource, Debug, Clone)]
pub struct DebugState {
    /// Seconds between log lines.
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_interval: 1.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub sim_frame: u64,
    pub obstacles: usize,
    pub coins: usize,
    pub bursts: usize,
    pub score: u64,
    pub speed: f32,
}

fn smooth(prev: f32, sample: f32) -> f32 {
    if prev == 0.0 {
        sample
    } else {
        prev * 0.9 + sample * 0.1
    }
}

pub fn debug_stats_collect_system(
    time: Res<Time>,
    session: Res<ActiveSession>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    stats.fps = smooth(stats.fps, 1.0 / dt);
    stats.frame_time_ms = smooth(stats.frame_time_ms, dt * 1000.0);
    stats.sim_frame = session.frame();
    stats.obstacles = session.obstacles.len();
    stats.coins = session.coins.len();
    stats.bursts = session.bursts.len();
    stats.score = session.state.display_score();
    stats.speed = session.state.speed;
}
