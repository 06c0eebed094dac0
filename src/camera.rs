//! Render camera placed from the session's camera rig.
//!
//! [`rig`] holds the mode logic and smoothing; this plugin only spawns the
//! `Camera3d` and copies the latest [`CameraFrame`] onto its transform.

mod entities;
mod rig;
mod systems;

pub use entities::{FlightCamera, LatestCameraFrame};
pub use rig::{CameraFrame, CameraMode, CameraRig, RigTuning};

use bevy::prelude::*;

use crate::controls::DeviceClass;
use crate::session::SessionTick;

/// Per-plugin configuration for the render camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CameraConfig {
    /// Rig presets for keyboard play.
    pub desktop: RigTuning,
    /// Rig presets for touch screens.
    pub touch: RigTuning,
    /// Vertical field of view (degrees).
    pub fov_degrees: f32,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            desktop: RigTuning::desktop(),
            touch: RigTuning::touch(),
            fov_degrees: 30.0,
            bloom_intensity: 0.15,
        }
    }
}

impl CameraConfig {
    /// Rig presets for `class`.
    pub fn tuning_for(&self, class: DeviceClass) -> RigTuning {
        match class {
            DeviceClass::Desktop => self.desktop.clone(),
            DeviceClass::Touch => self.touch.clone(),
        }
    }
}

/// Spawns the render camera and keeps it on the rig's output.
pub struct CameraRigPlugin(pub CameraConfig);

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraConfig>()
            .register_type::<FlightCamera>()
            .insert_resource(self.0.clone())
            .init_resource::<LatestCameraFrame>()
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(Update, systems::apply_camera_frame.after(SessionTick));
    }
}
