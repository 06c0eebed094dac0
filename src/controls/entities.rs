use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::intent::{Action, HeldActions, TouchControls};

/// Physical key bound to each [`Action`].
#[derive(Resource, Clone, Debug, Reflect)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub ascend: KeyCode,
    pub descend: KeyCode,
    pub rotate_left: KeyCode,
    pub rotate_right: KeyCode,
    pub toggle_first_person: KeyCode,
    pub speed_up: KeyCode,
    pub speed_down: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            ascend: KeyCode::ArrowUp,
            descend: KeyCode::ArrowDown,
            rotate_left: KeyCode::ArrowLeft,
            rotate_right: KeyCode::ArrowRight,
            toggle_first_person: KeyCode::KeyF,
            speed_up: KeyCode::Equal,
            speed_down: KeyCode::Minus,
        }
    }
}

impl KeyBindings {
    /// Key bound to `action`.
    pub fn key_for(&self, action: Action) -> KeyCode {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Ascend => self.ascend,
            Action::Descend => self.descend,
            Action::RotateLeft => self.rotate_left,
            Action::RotateRight => self.rotate_right,
            Action::ToggleFirstPerson => self.toggle_first_person,
            Action::SpeedUp => self.speed_up,
            Action::SpeedDown => self.speed_down,
        }
    }
}

/// Keyboard held state, maintained from press/release input.
#[derive(Resource, Default, Debug)]
pub struct KeyboardHeld(pub HeldActions);

/// Touch held state plus which finger drives which control.
#[derive(Resource, Default, Debug)]
pub struct TouchInput {
    pub controls: TouchControls,
    /// Finger id driving the joystick, with its starting point.
    pub joystick_finger: Option<(u64, Vec2)>,
    /// Finger ids currently holding a button.
    pub button_fingers: HashMap<u64, Action>,
}

impl TouchInput {
    /// Forgets every finger and releases all holds.
    pub fn clear(&mut self) {
        self.controls.release_all();
        self.joystick_finger = None;
        self.button_fingers.clear();
    }
}

/// Broad device category; picks tuning and camera smoothing presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Touch,
}

/// Currently active device class.
#[derive(Resource, Debug, Reflect)]
pub struct ActiveDevice {
    pub class: DeviceClass,
    /// Switch to [`DeviceClass::Touch`] on the first observed touch.
    pub auto_detect: bool,
}

impl Default for ActiveDevice {
    fn default() -> Self {
        Self {
            class: DeviceClass::Desktop,
            auto_detect: true,
        }
    }
}
