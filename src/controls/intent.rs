//! Control intent: the merged, per-frame view of every input source.
//!
//! Keyboard and touch each maintain their own held state. At the top of a
//! frame both are copied into an [`InputSnapshot`] and merged into one
//! [`ControlIntent`]; nothing downstream reads the sources directly.

use bevy::prelude::*;

use crate::math;

/// A named drone action that can be bound to a key or a touch button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Ascend,
    Descend,
    RotateLeft,
    RotateRight,
    ToggleFirstPerson,
    SpeedUp,
    SpeedDown,
}

impl Action {
    /// Every action, in binding order.
    pub const ALL: [Action; 11] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::Ascend,
        Action::Descend,
        Action::RotateLeft,
        Action::RotateRight,
        Action::ToggleFirstPerson,
        Action::SpeedUp,
        Action::SpeedDown,
    ];

    /// Short on-screen label for touch buttons.
    pub fn glyph(self) -> &'static str {
        match self {
            Action::Forward => "W",
            Action::Backward => "S",
            Action::Left => "A",
            Action::Right => "D",
            Action::Ascend => "Up",
            Action::Descend => "Down",
            Action::RotateLeft => "<",
            Action::RotateRight => ">",
            Action::ToggleFirstPerson => "Cam",
            Action::SpeedUp => "+",
            Action::SpeedDown => "-",
        }
    }
}

/// "Currently held" flag per action for a single input source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub struct HeldActions {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub ascend: bool,
    pub descend: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub toggle_first_person: bool,
    pub speed_up: bool,
    pub speed_down: bool,
}

impl HeldActions {
    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Forward => &mut self.forward,
            Action::Backward => &mut self.backward,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Ascend => &mut self.ascend,
            Action::Descend => &mut self.descend,
            Action::RotateLeft => &mut self.rotate_left,
            Action::RotateRight => &mut self.rotate_right,
            Action::ToggleFirstPerson => &mut self.toggle_first_person,
            Action::SpeedUp => &mut self.speed_up,
            Action::SpeedDown => &mut self.speed_down,
        }
    }

    pub fn is_held(self, action: Action) -> bool {
        let mut copy = self;
        *copy.slot(action)
    }

    /// Records a press (`true`) or release (`false`) of `action`.
    pub fn set(&mut self, action: Action, held: bool) {
        *self.slot(action) = held;
    }

    /// Logical OR of two sources.
    pub fn union(self, other: HeldActions) -> HeldActions {
        HeldActions {
            forward: self.forward || other.forward,
            backward: self.backward || other.backward,
            left: self.left || other.left,
            right: self.right || other.right,
            ascend: self.ascend || other.ascend,
            descend: self.descend || other.descend,
            rotate_left: self.rotate_left || other.rotate_left,
            rotate_right: self.rotate_right || other.rotate_right,
            toggle_first_person: self.toggle_first_person || other.toggle_first_person,
            speed_up: self.speed_up || other.speed_up,
            speed_down: self.speed_down || other.speed_down,
        }
    }
}

/// Virtual joystick: displacement of the driving touch from where it started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct JoystickState {
    /// `true` while a finger is on the joystick.
    pub active: bool,
    /// Screen-space displacement (x right, y down), clamped to the max radius.
    pub displacement: Vec2,
}

/// Touch-side input state: the joystick plus hold-buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct TouchControls {
    pub joystick: JoystickState,
    pub buttons: HeldActions,
}

impl TouchControls {
    /// Starts (or restarts) the joystick at `displacement` from its centre.
    pub fn joystick_move(&mut self, displacement: Vec2, max_radius: f32) {
        self.joystick = JoystickState {
            active: true,
            displacement: math::clamp_to_radius(displacement, max_radius),
        };
    }

    /// Releases the joystick, returning it to rest.
    pub fn joystick_end(&mut self) {
        self.joystick = JoystickState::default();
    }

    /// Records a hold-button press or release.
    pub fn set_button(&mut self, action: Action, held: bool) {
        self.buttons.set(action, held);
    }

    /// Drops every touch hold.
    pub fn release_all(&mut self) {
        *self = TouchControls::default();
    }
}

/// Joystick shaping parameters.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct JoystickTuning {
    /// Maximum thumb travel in logical pixels.
    pub max_radius: f32,
    /// Normalized magnitude below which the stick is ignored.
    pub dead_zone: f32,
}

impl Default for JoystickTuning {
    fn default() -> Self {
        Self {
            max_radius: 60.0,
            dead_zone: 0.1,
        }
    }
}

/// Consistent copy of both sources, taken once at the top of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub keyboard: HeldActions,
    pub touch: TouchControls,
}

impl InputSnapshot {
    /// Merges both sources into a single intent.
    ///
    /// Boolean actions are OR-ed. The joystick, when active and outside the
    /// dead-zone, contributes a normalized stick vector with `+y` meaning
    /// forward (screen-up).
    pub fn merge(&self, tuning: &JoystickTuning) -> ControlIntent {
        let held = self.keyboard.union(self.touch.buttons);
        let joystick = if self.touch.joystick.active && tuning.max_radius > 0.0 {
            let normalized = self.touch.joystick.displacement / tuning.max_radius;
            let shaped = math::apply_dead_zone(normalized.clamp_length_max(1.0), tuning.dead_zone);
            (shaped != Vec2::ZERO).then(|| Vec2::new(shaped.x, -shaped.y))
        } else {
            None
        };
        ControlIntent { held, joystick }
    }
}

/// Normalized control intent for one frame.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct ControlIntent {
    /// Held discrete actions, merged across sources.
    pub held: HeldActions,
    /// Analog stick vector in `[-1, 1]²` (`+x` right, `+y` forward), if any.
    pub joystick: Option<Vec2>,
}

impl ControlIntent {
    /// `true` if any movement (directional, vertical, or stick) is requested.
    pub fn wants_movement(&self) -> bool {
        let h = &self.held;
        h.forward || h.backward || h.left || h.right || h.ascend || h.descend || self.joystick.is_some()
    }
}

/// Screen-space placement of the touch hold-buttons (logical pixels).
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct TouchLayout {
    /// Side length of each square button.
    pub button_size: f32,
    /// Distance of the outermost buttons from the screen edge.
    pub margin: f32,
    /// Spacing between neighbouring button anchors.
    pub gap: f32,
    /// Fraction of the screen width (from the left) that drives the joystick.
    pub joystick_zone: f32,
}

impl Default for TouchLayout {
    fn default() -> Self {
        Self {
            button_size: 60.0,
            margin: 50.0,
            gap: 70.0,
            joystick_zone: 0.4,
        }
    }
}

/// What a touch landing at a given point controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchTarget {
    Joystick,
    Button(Action),
}

impl TouchLayout {
    /// Button rectangles as `(action, min, max)` for a window of `size`.
    pub fn buttons(&self, size: Vec2) -> [(Action, Vec2, Vec2); 5] {
        let s = self.button_size;
        // Anchored by distance from the right edge and from the bottom (or top) edge.
        let from_bottom_right = |right: f32, bottom: f32| {
            let min = Vec2::new(size.x - right - s, size.y - bottom - s);
            (min, min + Vec2::splat(s))
        };
        let (m, g) = (self.margin, self.gap);
        let rotate_right = from_bottom_right(m, m);
        let rotate_left = from_bottom_right(m + g, m);
        let ascend = from_bottom_right(m + 2.0 * g, m + g);
        let descend = from_bottom_right(m + 2.0 * g, m);
        let toggle_min = Vec2::new(size.x - m - s, m);
        [
            (Action::RotateRight, rotate_right.0, rotate_right.1),
            (Action::RotateLeft, rotate_left.0, rotate_left.1),
            (Action::Ascend, ascend.0, ascend.1),
            (Action::Descend, descend.0, descend.1),
            (Action::ToggleFirstPerson, toggle_min, toggle_min + Vec2::splat(s)),
        ]
    }

    /// Classifies a touch that started at `pos` in a window of `size`.
    pub fn target_at(&self, size: Vec2, pos: Vec2) -> Option<TouchTarget> {
        let hit = self.buttons(size).into_iter().find(|(_, min, max)| {
            pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y
        });
        if let Some((action, _, _)) = hit {
            return Some(TouchTarget::Button(action));
        }
        (pos.x < size.x * self.joystick_zone).then_some(TouchTarget::Joystick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(keyboard: HeldActions, touch: TouchControls) -> InputSnapshot {
        InputSnapshot { keyboard, touch }
    }

    #[test]
    fn no_sources_yield_empty_intent() {
        let intent = InputSnapshot::default().merge(&JoystickTuning::default());
        assert_eq!(intent, ControlIntent::default());
        assert!(!intent.wants_movement());
    }

    #[test]
    fn booleans_are_or_merged_across_sources() {
        let mut keys = HeldActions::default();
        keys.set(Action::Forward, true);
        let mut touch = TouchControls::default();
        touch.set_button(Action::RotateLeft, true);

        let intent = snapshot(keys, touch).merge(&JoystickTuning::default());
        assert!(intent.held.forward);
        assert!(intent.held.rotate_left);
        assert!(!intent.held.rotate_right);
    }

    #[test]
    fn joystick_is_normalized_and_flipped_to_forward() {
        let tuning = JoystickTuning::default();
        let mut touch = TouchControls::default();
        // Thumb pushed straight up the screen, past the rim.
        touch.joystick_move(Vec2::new(0.0, -200.0), tuning.max_radius);
        assert!((touch.joystick.displacement.length() - 60.0).abs() < 1e-4);

        let intent = snapshot(HeldActions::default(), touch).merge(&tuning);
        let stick = intent.joystick.unwrap();
        assert!((stick - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn joystick_inside_dead_zone_contributes_nothing() {
        let tuning = JoystickTuning::default();
        let mut touch = TouchControls::default();
        touch.joystick_move(Vec2::new(3.0, 2.0), tuning.max_radius);
        let intent = snapshot(HeldActions::default(), touch).merge(&tuning);
        assert_eq!(intent.joystick, None);
    }

    #[test]
    fn released_joystick_contributes_nothing() {
        let tuning = JoystickTuning::default();
        let mut touch = TouchControls::default();
        touch.joystick_move(Vec2::new(40.0, 0.0), tuning.max_radius);
        touch.joystick_end();
        let intent = snapshot(HeldActions::default(), touch).merge(&tuning);
        assert_eq!(intent.joystick, None);
    }

    #[test]
    fn release_all_clears_buttons_and_stick() {
        let mut touch = TouchControls::default();
        touch.set_button(Action::Ascend, true);
        touch.joystick_move(Vec2::X * 30.0, 60.0);
        touch.release_all();
        assert_eq!(touch, TouchControls::default());
    }

    #[test]
    fn every_action_round_trips_through_set() {
        for action in Action::ALL {
            let mut held = HeldActions::default();
            held.set(action, true);
            assert_ne!(held, HeldActions::default(), "{action:?} not stored");
            held.set(action, false);
            assert_eq!(held, HeldActions::default());
        }
    }

    #[test]
    fn layout_classifies_buttons_and_joystick() {
        let layout = TouchLayout::default();
        let size = Vec2::new(1000.0, 600.0);

        // Rotate-right sits in the bottom-right corner.
        let rr = Vec2::new(1000.0 - 50.0 - 30.0, 600.0 - 50.0 - 30.0);
        assert_eq!(
            layout.target_at(size, rr),
            Some(TouchTarget::Button(Action::RotateRight))
        );
        // First-person toggle in the top-right corner.
        let fp = Vec2::new(1000.0 - 50.0 - 30.0, 50.0 + 30.0);
        assert_eq!(
            layout.target_at(size, fp),
            Some(TouchTarget::Button(Action::ToggleFirstPerson))
        );
        assert_eq!(
            layout.target_at(size, Vec2::new(100.0, 500.0)),
            Some(TouchTarget::Joystick)
        );
        assert_eq!(layout.target_at(size, Vec2::new(600.0, 300.0)), None);
    }
}
