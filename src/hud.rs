//! egui overlays: start, checkpoint and end panels, status strip, drone
//! paint picker and the on-screen touch controls.
//!
//! Overlay state is driven only by course messages and [`GameState`].

mod panels;
mod systems;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::GameState;
use crate::session::{SessionState, SessionTick};

/// Per-plugin configuration for the overlays.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct HudConfig {
    /// Seconds before a checkpoint panel dismisses itself.
    pub checkpoint_timeout: f32,
    /// Mission briefing on the start panel.
    pub briefing: String,
    /// Lines shown under each checkpoint heading.
    pub checkpoint_lines: Vec<String>,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            checkpoint_timeout: 20.0,
            briefing: "Fly the package through the city. Pass every checkpoint, then \
                       drop it at the green ring."
                .into(),
            checkpoint_lines: vec![
                "Autonomous navigation".into(),
                "Live 3D routing".into(),
                "Ultra-fast dispatch".into(),
            ],
        }
    }
}

/// Overlay panels and the status strip.
pub struct HudPlugin(pub HudConfig);

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HudConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<panels::Overlays>()
            .init_resource::<panels::Customization>()
            .add_systems(
                Update,
                (systems::collect_course_messages, systems::expire_panels)
                    .chain()
                    .after(SessionTick),
            )
            .add_systems(OnEnter(GameState::Start), systems::reset_overlays)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    systems::start_panel.run_if(in_state(GameState::Start)),
                    systems::checkpoint_panel.run_if(in_state(GameState::Flying)),
                    systems::end_panel.run_if(in_state(GameState::Complete)),
                    systems::status_strip.run_if(resource_exists::<SessionState>),
                    systems::touch_controls.run_if(in_state(GameState::Flying)),
                    systems::customization_panel,
                ),
            );
    }
}
