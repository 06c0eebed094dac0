use avian3d::prelude::*;
use bevy::prelude::*;

use super::flight::PhysicsBody;

/// Marker component for the player-controlled drone entity.
#[derive(Component, Reflect)]
pub struct Drone;

/// Current body paint; changing it repaints the drone.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Reflect)]
pub struct DroneColor(pub Color);

/// Mutable access to the drone's physics state.
pub type DroneBodyQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Position,
        &'static mut Rotation,
        &'static mut LinearVelocity,
    ),
    With<Drone>,
>;

/// Adapts the drone's avian3d components to [`PhysicsBody`].
pub struct DroneBody<'a> {
    pub position: Mut<'a, Position>,
    pub rotation: Mut<'a, Rotation>,
    pub velocity: Mut<'a, LinearVelocity>,
}

impl<'a> DroneBody<'a> {
    /// The drone's body, or `None` while it is not spawned yet.
    pub fn from_query(query: &'a mut DroneBodyQuery<'_, '_>) -> Option<Self> {
        let (position, rotation, velocity) = query.single_mut().ok()?;
        Some(Self {
            position,
            rotation,
            velocity,
        })
    }
}

impl PhysicsBody for DroneBody<'_> {
    fn position(&self) -> Vec3 {
        self.position.0
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity.0 = velocity;
    }

    fn set_orientation(&mut self, rotation: Quat) {
        self.rotation.0 = rotation;
    }

    fn set_position(&mut self, position: Vec3) {
        self.position.0 = position;
    }
}
