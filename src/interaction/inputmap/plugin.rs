use bevy::prelude::*;

use super::parse::{default_input_map, parse_input_toml};
use super::systems::system_collect_actions;
use super::types::{FrameActions, InputMap};
use crate::core::system::system_order::InputCollectSet;

pub struct InputActionsPlugin;

impl Plugin for InputActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputMap>()
            .init_resource::<FrameActions>()
            .add_systems(PreStartup, load_initial_input_map)
            .add_systems(Update, system_collect_actions.in_set(InputCollectSet));
    }
}

fn load_initial_input_map(mut commands: Commands) {
    #[cfg(target_arch = "wasm32")]
    let raw: Option<String> = Some(include_str!("../../../assets/config/input.toml").to_string());
    #[cfg(not(target_arch = "wasm32"))]
    let raw: Option<String> = {
        let path = std::env::var("INPUT_CONFIG_PATH")
            .unwrap_or_else(|_| "assets/config/input.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(target: "input", "{path}: {e}; using built-in bindings");
                None
            }
        }
    };
    let Some(raw) = raw else {
        commands.insert_resource(default_input_map());
        return;
    };
    let parsed = parse_input_toml(&raw);
    for e in &parsed.errors {
        error!(target: "input", "INPUT MAP ERROR: {e}");
    }
    if parsed.input_map.bindings.is_empty() {
        warn!(target: "input", "input map has no usable bindings; using built-in bindings");
        commands.insert_resource(default_input_map());
    } else {
        info!(
            target: "input",
            "Input map loaded: {} actions bound",
            parsed.input_map.bindings.len()
        );
        commands.insert_resource(parsed.input_map);
    }
}
