use bevy::prelude::*;

use super::stats::{DebugState, DebugStats};

pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, stats: Res<DebugStats>) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(
            target: "debug",
            "SIM frame={} sim_frame={} t={:.3}s fps={:.1} ft_ms={:.1} obstacles={} coins={} bursts={} score={} speed={:.3}",
            state.frame_counter,
            stats.sim_frame,
            time.elapsed_secs(),
            stats.fps,
            stats.frame_time_ms,
            stats.obstacles,
            stats.coins,
            stats.bursts,
            stats.score,
            stats.speed
        );
    }
}
