// This file is part of Rail Runner.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::outbox::HostOutbox;
use crate::app::screens::ScreensPlugin;
use crate::app::session::{ActiveSession, SessionPlugin};
use crate::app::state::AppState;
use crate::audio::RunnerAudioPlugin;
use crate::core::config::RunnerConfig;
use crate::core::system::system_order::{HudSet, InputCollectSet, PresentationSet, SimulationSet};
use crate::debug::DebugPlugin;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::rendering::RenderingPlugin;

/// Simulation, input, lifecycle and audio; no rendering. Needs `StatesPlugin`.
pub struct RunnerCorePlugin;

impl Plugin for RunnerCorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<RunnerConfig>() {
            warn!(target: "config", "RunnerConfig not inserted; using defaults");
            app.insert_resource(RunnerConfig::default());
        }
        let session = ActiveSession::from_config(app.world().resource::<RunnerConfig>());

        app.configure_sets(
            Update,
            (InputCollectSet, SimulationSet, PresentationSet, HudSet).chain(),
        )
        .init_state::<AppState>()
        .init_resource::<HostOutbox>()
        .insert_resource(session)
        .add_plugins((InputActionsPlugin, SessionPlugin, RunnerAudioPlugin));
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((RunnerCorePlugin, RenderingPlugin, ScreensPlugin, DebugPlugin));
    }
}
