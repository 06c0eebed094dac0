use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::CheckpointConfig;
use super::course::CheckpointKind;
use super::entities::{CheckpointMarker, MarkerMaterials};
use crate::session::SessionState;

fn emissive_material(color: Color, glow: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        emissive: color.to_linear() * glow,
        ..default()
    }
}

/// Spawns one upright ring per checkpoint of the chosen layout.
pub fn spawn_markers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    session: Option<Res<SessionState>>,
    cfg: Res<CheckpointConfig>,
) {
    let Some(session) = session else {
        warn!("No session at startup; checkpoint markers skipped");
        return;
    };

    if session.checkpoints().is_empty() {
        warn!("Layout '{}' has no checkpoints", session.layout_name());
        return;
    }

    let handles = MarkerMaterials {
        waypoint: materials.add(emissive_material(cfg.waypoint_color, 6.0)),
        goal: materials.add(emissive_material(cfg.goal_color, 8.0)),
        reached: materials.add(emissive_material(cfg.reached_color, 0.5)),
    };

    for cp in session.checkpoints().iter() {
        let tube = cp.radius * cfg.ring_thickness;
        let ring = meshes.add(Torus::new(cp.radius - tube, cp.radius));
        let material = match cp.kind {
            CheckpointKind::Waypoint => handles.waypoint.clone(),
            CheckpointKind::Goal => handles.goal.clone(),
        };
        commands.spawn((
            Name::new(format!("Checkpoint {}", cp.id)),
            CheckpointMarker { id: cp.id.clone() },
            Mesh3d(ring),
            MeshMaterial3d(material),
            Transform::from_translation(cp.position)
                .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        ));
    }
    debug!(
        "Spawned {} checkpoint markers for '{}'",
        session.checkpoints().len(),
        session.layout_name()
    );

    commands.insert_resource(handles);
}

/// Turns every ring slowly around the world up axis.
pub fn spin_markers(
    time: Res<Time>,
    cfg: Res<CheckpointConfig>,
    mut query: Query<&mut Transform, With<CheckpointMarker>>,
) {
    let step = Quat::from_rotation_y(cfg.spin_speed * time.delta_secs());
    for mut transform in &mut query {
        transform.rotation = step * transform.rotation;
    }
}

/// Keeps each ring's material in line with its checkpoint's reached flag.
pub fn tint_markers(
    session: Res<SessionState>,
    handles: Option<Res<MarkerMaterials>>,
    mut query: Query<(&CheckpointMarker, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    let Some(handles) = handles else {
        return;
    };
    for (marker, mut material) in &mut query {
        let Some(cp) = session.checkpoints().iter().find(|cp| cp.id == marker.id) else {
            continue;
        };
        let wanted = match (cp.is_reached(), cp.kind) {
            (true, _) => &handles.reached,
            (false, CheckpointKind::Waypoint) => &handles.waypoint,
            (false, CheckpointKind::Goal) => &handles.goal,
        };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}
