//! Input aggregation: keyboard + touch into one [`ControlIntent`] per frame.
//!
//! Key and touch state are tracked separately as they arrive, then merged
//! once per frame by [`systems::aggregate_intent`] before anything reads it.

mod entities;
pub mod intent;
mod systems;

pub use entities::{ActiveDevice, DeviceClass, KeyBindings, TouchInput};
pub use intent::ControlIntent;

use bevy::prelude::*;

use crate::GameState;
use intent::{JoystickTuning, TouchLayout};

/// Per-plugin configuration for input handling.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ControlsConfig {
    /// Virtual joystick radius and dead-zone.
    pub joystick: JoystickTuning,
    /// On-screen placement of the touch buttons.
    pub touch_layout: TouchLayout,
    /// Key bindings.
    pub bindings: KeyBindings,
    /// Device class at startup.
    pub device: DeviceClass,
    /// Switch to touch presets the first time a touch is seen.
    pub auto_detect_touch: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            joystick: JoystickTuning::default(),
            touch_layout: TouchLayout::default(),
            bindings: KeyBindings::default(),
            device: DeviceClass::Desktop,
            auto_detect_touch: true,
        }
    }
}

/// System set that produces the frame's [`ControlIntent`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GatherIntent;

/// Keyboard + touch input aggregation.
pub struct ControlsPlugin(pub ControlsConfig);

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ControlsConfig>()
            .register_type::<ActiveDevice>()
            .insert_resource(self.0.clone())
            .insert_resource(self.0.bindings.clone())
            .insert_resource(ActiveDevice {
                class: self.0.device,
                auto_detect: self.0.auto_detect_touch,
            })
            .init_resource::<entities::KeyboardHeld>()
            .init_resource::<TouchInput>()
            .init_resource::<ControlIntent>()
            .add_systems(
                Update,
                (
                    (systems::read_keyboard, systems::read_touches),
                    systems::aggregate_intent,
                )
                    .chain()
                    .in_set(GatherIntent)
                    .run_if(in_state(GameState::Flying)),
            )
            .add_systems(Update, systems::detect_touch_device)
            .add_systems(OnExit(GameState::Flying), systems::release_all_inputs);
    }
}
