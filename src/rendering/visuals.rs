//! Entities behind the session's visual handles, plus the player model.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::app::outbox::{HostOutbox, VisualRequest};
use crate::core::components::{LaneLayout, ObstacleKind, VisualHandle};
use crate::core::config::RunnerConfig;
use crate::rendering::materials::materials::{attach_parts, RunnerAssets, RunnerAssetsInitSet};

const COIN_HEIGHT: f32 = 1.8;
const COIN_BOB: f32 = 0.2;
const COIN_BOB_RATE: f32 = 0.005;
const COIN_SPIN: f32 = 0.1;
const BURST_GROWTH: f32 = 1.1;
const BURST_RISE: f32 = 3.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct TrackedVisual(pub VisualHandle);

#[derive(Component, Debug)]
pub struct CoinVisual;

#[derive(Component, Debug)]
pub struct Collecting;

#[derive(Component, Debug)]
pub struct PlayerVisual;

#[derive(Resource, Debug, Default)]
pub struct VisualIndex(pub HashMap<VisualHandle, Entity>);

/// Snapshot frame last applied; bursts animate once per simulated frame.
#[derive(Resource, Debug, Default)]
pub struct LastSyncedFrame(pub Option<u64>);

pub fn spawn_player_model(mut commands: Commands, cfg: Res<RunnerConfig>, assets: Res<RunnerAssets>) {
    let lanes = LaneLayout::from_track(&cfg.track);
    let x = lanes.center_x(lanes.clamp(cfg.player.start_lane));
    let root = commands
        .spawn((
            PlayerVisual,
            Transform::from_xyz(x, cfg.player.base_height, cfg.player.z),
            Visibility::default(),
        ))
        .id();
    attach_parts(&mut commands, root, &assets.player);
}

pub fn apply_visual_requests(
    mut commands: Commands,
    mut outbox: ResMut<HostOutbox>,
    mut index: ResMut<VisualIndex>,
    cfg: Res<RunnerConfig>,
    assets: Res<RunnerAssets>,
) {
    if outbox.visuals.is_empty() {
        return;
    }
    let lanes = LaneLayout::from_track(&cfg.track);
    for request in std::mem::take(&mut outbox.visuals) {
        match request {
            VisualRequest::SpawnObstacle {
                handle,
                kind,
                lane,
                z,
            } => {
                let parts = match kind {
                    ObstacleKind::Box => &assets.obstacle_box,
                    ObstacleKind::Barrier => &assets.obstacle_barrier,
                    ObstacleKind::Cone => &assets.obstacle_cone,
                    ObstacleKind::Train => &assets.obstacle_train,
                };
                let e = commands
                    .spawn((
                        TrackedVisual(handle),
                        Transform::from_xyz(lanes.center_x(lane), 0.0, z),
                        Visibility::default(),
                    ))
                    .id();
                attach_parts(&mut commands, e, parts);
                index.0.insert(handle, e);
            }
            VisualRequest::SpawnCoin { handle, lane, z } => {
                let e = commands
                    .spawn((
                        TrackedVisual(handle),
                        CoinVisual,
                        Transform::from_xyz(lanes.center_x(lane), COIN_HEIGHT, z),
                        Visibility::default(),
                    ))
                    .id();
                attach_parts(&mut commands, e, &assets.coin);
                index.0.insert(handle, e);
            }
            VisualRequest::PlayCollect(handle) => {
                if let Some(&e) = index.0.get(&handle) {
                    commands.entity(e).insert(Collecting);
                }
            }
            VisualRequest::Remove(handle) => {
                if let Some(e) = index.0.remove(&handle) {
                    commands.entity(e).despawn();
                }
            }
        }
    }
}

pub fn sync_visual_transforms(
    outbox: Res<HostOutbox>,
    index: Res<VisualIndex>,
    mut last: ResMut<LastSyncedFrame>,
    mut q_tracked: Query<&mut Transform, (With<TrackedVisual>, Without<PlayerVisual>)>,
    mut q_player: Query<&mut Transform, (With<PlayerVisual>, Without<TrackedVisual>)>,
) {
    let Some(snap) = &outbox.snapshot else {
        return;
    };
    if last.0 == Some(snap.frame) {
        return;
    }
    last.0 = Some(snap.frame);

    for &(handle, x, z) in snap.obstacles.iter().chain(snap.coins.iter()) {
        let Some(&e) = index.0.get(&handle) else { continue };
        if let Ok(mut tf) = q_tracked.get_mut(e) {
            tf.translation.x = x;
            tf.translation.z = z;
        }
    }
    for &(handle, x, z, progress) in &snap.bursts {
        let Some(&e) = index.0.get(&handle) else { continue };
        if let Ok(mut tf) = q_tracked.get_mut(e) {
            tf.translation.x = x;
            tf.translation.z = z;
            tf.translation.y += progress * BURST_RISE;
            tf.scale *= BURST_GROWTH;
        }
    }

    if let Ok(mut tf) = q_player.single_mut() {
        let pose = snap.player;
        tf.translation = Vec3::new(pose.x, pose.y, pose.z);
        tf.scale.y = pose.scale_y;
        tf.rotation = Quat::from_euler(EulerRot::XYZ, pose.lean, 0.0, pose.tilt);
    }
}

/// Idle bob and spin; only runs while a run is active.
pub fn animate_coins(
    time: Res<Time<Real>>,
    index: Res<VisualIndex>,
    mut q: Query<(&TrackedVisual, &mut Transform), (With<CoinVisual>, Without<Collecting>)>,
) {
    let t_ms = time.elapsed_secs() * 1000.0;
    for (tracked, mut tf) in &mut q {
        if !index.0.contains_key(&tracked.0) {
            continue;
        }
        let phase = tracked.0 .0 as f32;
        tf.translation.y = COIN_HEIGHT + (t_ms * COIN_BOB_RATE + phase).sin() * COIN_BOB;
        tf.rotate_y(COIN_SPIN);
    }
}

pub struct VisualsPlugin;

impl Plugin for VisualsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisualIndex>()
            .init_resource::<LastSyncedFrame>()
            .add_systems(Startup, spawn_player_model.after(RunnerAssetsInitSet));
    }
}
