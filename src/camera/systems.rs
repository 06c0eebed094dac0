use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;

use super::CameraConfig;
use super::entities::{FlightCamera, LatestCameraFrame};

/// Spawns the Camera3d entity with HDR and bloom.
pub fn spawn_camera(mut commands: Commands, cfg: Res<CameraConfig>) {
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: cfg.fov_degrees.to_radians(),
            ..default()
        }),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: cfg.bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        Transform::from_xyz(0.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        FlightCamera,
    ));
}

/// Copies the latest rig frame onto the camera. No frame, no change.
pub fn apply_camera_frame(
    latest: Res<LatestCameraFrame>,
    mut query: Query<&mut Transform, With<FlightCamera>>,
) {
    let Some(frame) = latest.0 else {
        return;
    };
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    transform.translation = frame.eye;
    transform.rotation = frame.rotation;
}
