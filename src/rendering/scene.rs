//! Camera, lighting, fog, and the recycled track geometry.

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use crate::app::outbox::HostOutbox;
use crate::app::session::ActiveSession;
use crate::gameplay::track::SegmentKind;
use crate::rendering::materials::materials::{MeshPart, RunnerAssets, RunnerAssetsInitSet};
use crate::rendering::palette::palette::SKY;

/// Index into the session's segment pool.
#[derive(Component, Debug, Clone, Copy)]
pub struct SegmentVisual(pub usize);

pub fn setup_scene(mut commands: Commands) {
    commands.insert_resource(ClearColor(SKY));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 600.0,
        ..default()
    });
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 5.0, 10.0).looking_at(Vec3::new(0.0, 2.0, 0.0), Vec3::Y),
        DistanceFog {
            color: SKY,
            falloff: FogFalloff::Linear {
                start: 50.0,
                end: 150.0,
            },
            ..default()
        },
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub fn spawn_track_segments(
    mut commands: Commands,
    session: Res<ActiveSession>,
    assets: Res<RunnerAssets>,
) {
    for (i, seg) in session.track().segments().iter().enumerate() {
        let part: &MeshPart = match seg.kind {
            SegmentKind::Ground => &assets.ground,
            SegmentKind::Rail => &assets.rail,
            SegmentKind::LaneLine => &assets.lane_line,
            SegmentKind::Wall(_) => &assets.wall,
            SegmentKind::Pillar(_) => &assets.pillar,
        };
        let mut transform = part.transform;
        transform.translation.x = seg.x;
        transform.translation.z = seg.z;
        commands.spawn((
            SegmentVisual(i),
            Mesh3d(part.mesh.clone()),
            MeshMaterial3d(part.material.clone()),
            transform,
        ));
    }
    debug!(target: "render", "spawned {} track segments", session.track().len());
}

pub fn sync_track_segments(
    outbox: Res<HostOutbox>,
    mut q: Query<(&SegmentVisual, &mut Transform)>,
) {
    if !outbox.is_changed() || outbox.segment_z.is_empty() {
        return;
    }
    for (seg, mut tf) in &mut q {
        if let Some(z) = outbox.segment_z.get(seg.0) {
            tf.translation.z = *z;
        }
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_scene, spawn_track_segments.after(RunnerAssetsInitSet)),
        );
    }
}
