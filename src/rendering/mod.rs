pub mod materials;
pub mod palette;
pub mod scene;
pub mod visuals;

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::system::system_order::PresentationSet;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            materials::materials::MaterialsPlugin,
            scene::ScenePlugin,
            visuals::VisualsPlugin,
        ))
        .add_systems(
            Update,
            (
                visuals::apply_visual_requests,
                scene::sync_track_segments,
                visuals::sync_visual_transforms,
                visuals::animate_coins.run_if(in_state(AppState::Running)),
            )
                .chain()
                .in_set(PresentationSet),
        );
    }
}
