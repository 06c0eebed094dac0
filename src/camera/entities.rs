use bevy::prelude::*;

use super::rig::CameraFrame;

/// Marker for the render camera entity.
#[derive(Component, Reflect)]
pub struct FlightCamera;

/// Most recent rig output, written by the session each frame.
#[derive(Resource, Default, Debug)]
pub struct LatestCameraFrame(pub Option<CameraFrame>);
