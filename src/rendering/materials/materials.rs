use crate::core::components::LaneLayout;
use crate::core::config::RunnerConfig;
use crate::rendering::palette::palette::*;
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct RunnerAssetsInitSet;

#[derive(Clone, Debug)]
pub struct MeshPart {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub transform: Transform,
}

/// Mesh + material pairs shared by every spawned visual.
#[derive(Resource, Clone, Debug)]
pub struct RunnerAssets {
    pub ground: MeshPart,
    pub rail: MeshPart,
    pub lane_line: MeshPart,
    pub wall: MeshPart,
    pub pillar: MeshPart,
    pub obstacle_box: Vec<MeshPart>,
    pub obstacle_barrier: Vec<MeshPart>,
    pub obstacle_cone: Vec<MeshPart>,
    pub obstacle_train: Vec<MeshPart>,
    pub coin: Vec<MeshPart>,
    pub player: Vec<MeshPart>,
}

pub struct MaterialsPlugin;

impl Plugin for MaterialsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_runner_assets.in_set(RunnerAssetsInitSet));
    }
}

fn std_mat(materials: &mut Assets<StandardMaterial>, color: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.8,
        ..default()
    })
}

fn translucent(materials: &mut Assets<StandardMaterial>, color: Color, unlit: bool) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        alpha_mode: AlphaMode::Blend,
        unlit,
        ..default()
    })
}

fn part(mesh: Handle<Mesh>, material: Handle<StandardMaterial>, transform: Transform) -> MeshPart {
    MeshPart {
        mesh,
        material,
        transform,
    }
}

fn setup_runner_assets(
    mut commands: Commands,
    cfg: Res<RunnerConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let lanes = LaneLayout::from_track(&cfg.track);
    let len = cfg.track.tile_length;
    let at_y = |y: f32| Transform::from_xyz(0.0, y, 0.0);

    let ground = part(
        meshes.add(Plane3d::default().mesh().size(lanes.half_span() * 2.0, len)),
        materials.add(StandardMaterial {
            base_color: GROUND,
            perceptual_roughness: 0.9,
            ..default()
        }),
        at_y(0.0),
    );
    let rail = part(meshes.add(Cuboid::new(0.2, 0.1, len)), std_mat(&mut materials, RAIL), at_y(0.05));
    let lane_line = part(
        meshes.add(Cuboid::new(0.1, 0.1, len)),
        materials.add(StandardMaterial {
            base_color: LANE_LINE,
            unlit: true,
            ..default()
        }),
        at_y(0.05),
    );
    let wall = part(meshes.add(Cuboid::new(1.0, 8.0, len)), std_mat(&mut materials, WALL), at_y(4.0));
    let pillar = part(meshes.add(Cylinder::new(0.3, 6.0)), std_mat(&mut materials, PILLAR), at_y(3.0));

    let obstacle_box = vec![part(meshes.add(Cuboid::new(1.5, 1.5, 1.5)), std_mat(&mut materials, BOX), at_y(0.75))];
    let obstacle_barrier = vec![part(meshes.add(Cuboid::new(2.0, 1.0, 0.5)), std_mat(&mut materials, BARRIER), at_y(0.5))];
    let obstacle_cone = vec![part(
        meshes.add(Cone {
            radius: 0.5,
            height: 1.5,
        }),
        std_mat(&mut materials, CONE),
        at_y(0.75),
    )];
    let obstacle_train = vec![
        part(meshes.add(Cuboid::new(2.5, 2.5, 8.0)), std_mat(&mut materials, TRAIN_BODY), at_y(1.25)),
        part(meshes.add(Cuboid::new(2.6, 0.8, 6.0)), translucent(&mut materials, TRAIN_WINDOWS, false), at_y(1.75)),
        part(meshes.add(Cuboid::new(2.6, 0.2, 8.0)), std_mat(&mut materials, TRAIN_STRIPE), at_y(0.45)),
    ];

    let disc = Transform::from_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));
    let coin = vec![
        part(
            meshes.add(Cylinder::new(0.4, 0.15)),
            materials.add(StandardMaterial {
                base_color: COIN,
                metallic: 0.8,
                perceptual_roughness: 0.2,
                emissive: COIN_EMISSIVE.into(),
                ..default()
            }),
            disc,
        ),
        part(meshes.add(Cylinder::new(0.5, 0.05)), translucent(&mut materials, COIN_GLOW, true), disc),
    ];

    let body_mat = std_mat(&mut materials, PLAYER_BODY);
    let limb = meshes.add(Cuboid::new(0.3, 1.0, 0.3));
    let legs_mat = std_mat(&mut materials, PLAYER_LEGS);
    let player = vec![
        part(meshes.add(Cuboid::new(0.8, 1.5, 0.6)), body_mat.clone(), at_y(0.75)),
        part(meshes.add(Sphere::new(0.4)), std_mat(&mut materials, PLAYER_SKIN), at_y(1.8)),
        part(limb.clone(), body_mat.clone(), Transform::from_xyz(-0.6, 0.75, 0.0)),
        part(limb.clone(), body_mat, Transform::from_xyz(0.6, 0.75, 0.0)),
        part(limb.clone(), legs_mat.clone(), Transform::from_xyz(-0.3, -0.5, 0.0)),
        part(limb, legs_mat, Transform::from_xyz(0.3, -0.5, 0.0)),
    ];

    commands.insert_resource(RunnerAssets {
        ground,
        rail,
        lane_line,
        wall,
        pillar,
        obstacle_box,
        obstacle_barrier,
        obstacle_cone,
        obstacle_train,
        coin,
        player,
    });
}

/// Spawns `parts` as children of `parent`.
pub fn attach_parts(commands: &mut Commands, parent: Entity, parts: &[MeshPart]) {
    commands.entity(parent).with_children(|p| {
        for mp in parts {
            p.spawn((
                Mesh3d(mp.mesh.clone()),
                MeshMaterial3d(mp.material.clone()),
                mp.transform,
            ));
        }
    });
}
