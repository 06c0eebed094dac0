use bevy::prelude::*;

use super::course::CheckpointKind;

/// Ring marker for the checkpoint with the same id.
#[derive(Component, Reflect)]
pub struct CheckpointMarker {
    pub id: String,
}

/// Shared marker materials, swapped as checkpoints are reached.
#[derive(Resource)]
pub struct MarkerMaterials {
    pub waypoint: Handle<StandardMaterial>,
    pub goal: Handle<StandardMaterial>,
    pub reached: Handle<StandardMaterial>,
}

/// A checkpoint was reached this frame.
#[derive(Message, Clone, Debug)]
pub struct CheckpointReached {
    pub id: String,
    /// Overlay heading for the checkpoint panel.
    pub heading: String,
    pub kind: CheckpointKind,
}

/// The goal was reached; the delivery is done.
#[derive(Message, Clone, Debug)]
pub struct MissionComplete {
    pub heading: String,
}
