//! Debug module: feature gated simulation stats and periodic logging.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
pub mod stats;

use bevy::prelude::*;

pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use crate::core::system::system_order::HudSet;
        use logging::debug_logging_system;
        use stats::{debug_stats_collect_system, DebugState, DebugStats};

        app.init_resource::<DebugState>()
            .init_resource::<DebugStats>()
            .add_systems(
                Update,
                (debug_stats_collect_system, debug_logging_system)
                    .chain()
                    .after(HudSet),
            );
    }
}

#[cfg(not(feature = "debug"))]
impl Plugin for DebugPlugin {
    fn build(&self, _app: &mut App) {}
}
