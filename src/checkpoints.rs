//! Checkpoint course: layout choice, trigger evaluation and ring markers.
//!
//! Evaluation itself lives in [`course`] and is driven by the session tick.
//! This plugin owns the course messages and the visual markers.

pub mod course;
mod entities;
mod systems;

pub use entities::{CheckpointMarker, CheckpointReached, MissionComplete};

use bevy::prelude::*;

/// Per-plugin configuration for the checkpoint course.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CheckpointConfig {
    /// Index into [`course::layout_pool`]; `None` picks one at random.
    pub pinned_layout: Option<usize>,
    /// Marker colour for an unreached waypoint.
    pub waypoint_color: Color,
    /// Marker colour for the unreached goal.
    pub goal_color: Color,
    /// Marker colour once reached.
    pub reached_color: Color,
    /// Ring tube thickness as a fraction of the trigger radius.
    pub ring_thickness: f32,
    /// Marker spin around the vertical axis (rad/s).
    pub spin_speed: f32,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            pinned_layout: None,
            waypoint_color: Color::srgb(1.0, 0.75, 0.1),
            goal_color: Color::srgb(0.2, 1.0, 0.4),
            reached_color: Color::srgb(0.25, 0.25, 0.3),
            ring_thickness: 0.08,
            spin_speed: 0.8,
        }
    }
}

/// Course messages and checkpoint ring markers.
pub struct CheckpointPlugin(pub CheckpointConfig);

impl Plugin for CheckpointPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CheckpointConfig>()
            .register_type::<CheckpointMarker>()
            .insert_resource(self.0.clone())
            .add_message::<CheckpointReached>()
            .add_message::<MissionComplete>()
            .add_systems(PostStartup, systems::spawn_markers)
            .add_systems(
                Update,
                (
                    systems::spin_markers,
                    systems::tint_markers
                        .run_if(resource_exists_and_changed::<crate::session::SessionState>),
                ),
            );
    }
}
