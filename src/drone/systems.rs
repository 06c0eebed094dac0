use avian3d::prelude::*;
use bevy::prelude::*;

use super::DroneConfig;
use super::entities::{Drone, DroneColor};

/// Spawns the drone as a kinematically steered dynamic body with four rotors.
pub fn spawn_drone(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<DroneConfig>,
) {
    let size = cfg.half_extents * 2.0;
    let body_mesh = meshes.add(Cuboid::new(size.x, size.y, size.z));
    let body_material = materials.add(StandardMaterial {
        base_color: cfg.body_color,
        perceptual_roughness: 0.6,
        ..default()
    });

    let rotor_radius = cfg.half_extents.x * 0.45;
    let rotor_mesh = meshes.add(Cylinder::new(rotor_radius, 0.02));
    let rotor_material = materials.add(StandardMaterial {
        base_color: cfg.rotor_color,
        emissive: cfg.rotor_color.to_linear() * 4.0,
        ..default()
    });

    // Rotors sit on the corners, slightly above the body.
    let he = cfg.half_extents;
    let corners = [
        Vec3::new(he.x, he.y, he.z),
        Vec3::new(-he.x, he.y, he.z),
        Vec3::new(he.x, he.y, -he.z),
        Vec3::new(-he.x, he.y, -he.z),
    ];

    commands
        .spawn((
            Name::new("Drone"),
            Drone,
            Mesh3d(body_mesh),
            MeshMaterial3d(body_material),
            Transform::from_translation(cfg.spawn),
            RigidBody::Dynamic,
            Collider::cuboid(size.x, size.y, size.z),
            LockedAxes::ROTATION_LOCKED,
            LinearDamping(cfg.linear_damping),
            GravityScale(0.0),
        ))
        .with_children(|parent| {
            for (i, corner) in corners.into_iter().enumerate() {
                parent.spawn((
                    Name::new(format!("Rotor {i}")),
                    Mesh3d(rotor_mesh.clone()),
                    MeshMaterial3d(rotor_material.clone()),
                    Transform::from_translation(corner + Vec3::Y * 0.02),
                ));
            }
        });

    info!("Drone spawned at {}", cfg.spawn);
}

/// Writes [`DroneColor`] into the drone body's material.
pub fn paint_drone(
    color: Res<DroneColor>,
    query: Query<&MeshMaterial3d<StandardMaterial>, With<Drone>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(handle) = query.single() else {
        return;
    };
    let Some(mut material) = materials.get_mut(&handle.0) else {
        return;
    };
    material.base_color = color.0;
    debug!("Drone repainted {:?}", color.0.to_srgba());
}
