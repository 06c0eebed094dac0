//! The player drone: a dynamic rigid body steered by [`flight`].
//!
//! The body itself is plain avian3d; [`DroneBody`] exposes just position,
//! velocity and orientation to the flight integrator.

mod entities;
pub mod flight;
mod systems;

pub use entities::{Drone, DroneBody, DroneBodyQuery, DroneColor};

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::camera::CameraMode;
use crate::controls::DeviceClass;
use flight::FlightTuning;

/// Per-plugin configuration for the drone.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct DroneConfig {
    /// Spawn point, also used on restart.
    pub spawn: Vec3,
    /// Flight presets for keyboard play.
    pub desktop: FlightTuning,
    /// Flight presets for touch screens.
    pub touch: FlightTuning,
    /// Camera mode at session start and after a restart.
    pub initial_camera_mode: CameraMode,
    /// Half extents of the box collider.
    pub half_extents: Vec3,
    /// Linear damping applied by the physics body.
    pub linear_damping: f32,
    /// Body colour at startup; the player can repaint it from the HUD.
    pub body_color: Color,
    /// Rotor colour.
    pub rotor_color: Color,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(21.2, 3.3, -18.0),
            desktop: FlightTuning::desktop(),
            touch: FlightTuning::touch(),
            initial_camera_mode: CameraMode::Chase,
            half_extents: Vec3::new(0.35, 0.08, 0.35),
            linear_damping: 4.0,
            body_color: body_palette()[0].1,
            rotor_color: Color::srgb(0.0, 0.76, 0.68),
        }
    }
}

impl DroneConfig {
    /// Flight presets for `class`.
    pub fn tuning_for(&self, class: DeviceClass) -> FlightTuning {
        match class {
            DeviceClass::Desktop => self.desktop,
            DeviceClass::Touch => self.touch,
        }
    }
}

/// Named body colours offered by the customization panel, default first.
pub fn body_palette() -> [(&'static str, Color); 6] {
    [
        ("Default", Color::srgb_u8(0xef, 0xcd, 0x54)),
        ("Red", Color::srgb_u8(0xff, 0x00, 0x00)),
        ("Blue", Color::srgb_u8(0x00, 0x00, 0xff)),
        ("Green", Color::srgb_u8(0x00, 0xff, 0x00)),
        ("Purple", Color::srgb_u8(0x80, 0x00, 0x80)),
        ("Orange", Color::srgb_u8(0xff, 0xa5, 0x00)),
    ]
}

/// Spawns the drone body.
pub struct DronePlugin(pub DroneConfig);

impl Plugin for DronePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Drone>()
            .register_type::<DroneConfig>()
            .register_type::<DroneColor>()
            .insert_resource(self.0.clone())
            .insert_resource(DroneColor(self.0.body_color))
            .add_plugins(PhysicsPlugins::default())
            .add_systems(Startup, systems::spawn_drone)
            .add_systems(
                Update,
                systems::paint_drone.run_if(resource_changed::<DroneColor>),
            );
    }
}
