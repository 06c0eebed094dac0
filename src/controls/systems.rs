use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::ControlsConfig;
use super::entities::{ActiveDevice, DeviceClass, KeyBindings, KeyboardHeld, TouchInput};
use super::intent::{Action, ControlIntent, InputSnapshot, TouchTarget};

/// Mirrors the bound keys' held state into [`KeyboardHeld`].
pub fn read_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut held: ResMut<KeyboardHeld>,
) {
    for action in Action::ALL {
        held.0.set(action, keys.pressed(bindings.key_for(action)));
    }
}

/// Routes touches to the virtual joystick or a hold-button.
///
/// The first finger to land in the joystick zone owns the joystick until it
/// lifts; each button stays held while any finger that started on it is down.
pub fn read_touches(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cfg: Res<ControlsConfig>,
    mut input: ResMut<TouchInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    let max_radius = cfg.joystick.max_radius;

    for touch in touches.iter_just_pressed() {
        match cfg.touch_layout.target_at(size, touch.start_position()) {
            Some(TouchTarget::Button(action)) => {
                input.button_fingers.insert(touch.id(), action);
                input.controls.set_button(action, true);
            }
            Some(TouchTarget::Joystick) if input.joystick_finger.is_none() => {
                input.joystick_finger = Some((touch.id(), touch.start_position()));
                input.controls.joystick_move(Vec2::ZERO, max_radius);
            }
            _ => {}
        }
    }

    if let Some((id, origin)) = input.joystick_finger
        && let Some(touch) = touches.get_pressed(id)
    {
        input
            .controls
            .joystick_move(touch.position() - origin, max_radius);
    }

    for touch in touches
        .iter_just_released()
        .chain(touches.iter_just_canceled())
    {
        if input
            .joystick_finger
            .is_some_and(|(id, _)| id == touch.id())
        {
            input.joystick_finger = None;
            input.controls.joystick_end();
        }
        if let Some(action) = input.button_fingers.remove(&touch.id()) {
            let still_held = input.button_fingers.values().any(|a| *a == action);
            input.controls.set_button(action, still_held);
        }
    }
}

/// Snapshots both sources and writes the merged [`ControlIntent`].
pub fn aggregate_intent(
    keyboard: Res<KeyboardHeld>,
    touch: Res<TouchInput>,
    cfg: Res<ControlsConfig>,
    mut intent: ResMut<ControlIntent>,
) {
    let snapshot = InputSnapshot {
        keyboard: keyboard.0,
        touch: touch.controls,
    };
    *intent = snapshot.merge(&cfg.joystick);
}

/// Switches to touch presets the first time a finger lands.
pub fn detect_touch_device(touches: Res<Touches>, mut device: ResMut<ActiveDevice>) {
    if !device.auto_detect || device.class == DeviceClass::Touch {
        return;
    }
    if touches.iter_just_pressed().next().is_some() {
        device.class = DeviceClass::Touch;
        info!("Touch input detected, switching to touch presets");
    }
}

/// Drops every held input when flying stops, so nothing carries over.
pub fn release_all_inputs(
    mut keyboard: ResMut<KeyboardHeld>,
    mut touch: ResMut<TouchInput>,
    mut intent: ResMut<ControlIntent>,
) {
    keyboard.0 = Default::default();
    touch.clear();
    *intent = ControlIntent::default();
    debug!("Released all held inputs");
}
