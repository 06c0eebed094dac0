use avian3d::prelude::*;
use bevy::prelude::*;

use super::CityConfig;
use super::lots;
use crate::checkpoints::course;
use crate::drone::DroneConfig;

/// Flat ground with a thin static collider just below `y = 0`.
pub fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<CityConfig>,
) {
    let size = cfg.ground_size;
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(size, size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: cfg.ground_color,
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::default(),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
    ));
}

/// One static box per free lot. Every course checkpoint and the spawn point
/// are kept clear, whichever layout the session picks.
pub fn spawn_buildings(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<CityConfig>,
    drone: Res<DroneConfig>,
) {
    let keep_clear: Vec<Vec3> = course::layout_pool()
        .into_iter()
        .flat_map(|layout| layout.checkpoints.into_iter().map(|cp| cp.position))
        .chain(std::iter::once(drone.spawn))
        .collect();
    let lots = lots::building_lots(&cfg, &keep_clear);

    let material = materials.add(StandardMaterial {
        base_color: cfg.building_color,
        perceptual_roughness: 0.8,
        ..default()
    });
    let unit_box = meshes.add(Cuboid::new(1.0, 1.0, 1.0));

    let parent = commands
        .spawn((
            Name::new("City"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for lot in &lots {
        let size = Vec3::new(cfg.footprint, lot.height, cfg.footprint);
        let building = commands
            .spawn((
                Name::new("Building"),
                Mesh3d(unit_box.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(lot.center.x, lot.height / 2.0, lot.center.y)
                    .with_scale(size),
                RigidBody::Static,
                // Avian scales colliders by the transform.
                Collider::cuboid(1.0, 1.0, 1.0),
            ))
            .id();
        commands.entity(parent).add_child(building);
    }
    info!("City built: {} buildings (seed {})", lots.len(), cfg.seed);
}

/// Directional sunlight from the south-west.
pub fn spawn_sun(mut commands: Commands, cfg: Res<CityConfig>) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: cfg.sun_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-30.0, 60.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
