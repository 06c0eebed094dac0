//! Flight integration: control intent in, body velocity and heading out.
//!
//! Velocity is recomputed (not accumulated) every frame from the current
//! intent and yaw, so the only inertia is whatever damping the physics body
//! applies between frames.

use bevy::prelude::*;

use crate::camera::CameraMode;
use crate::controls::ControlIntent;
use crate::math;

/// The slice of a rigid body the flight integrator is allowed to touch.
pub trait PhysicsBody {
    /// Current world position.
    fn position(&self) -> Vec3;
    /// Overwrites the linear velocity.
    fn set_velocity(&mut self, velocity: Vec3);
    /// Overwrites the orientation.
    fn set_orientation(&mut self, rotation: Quat);
    /// Teleports the body.
    fn set_position(&mut self, position: Vec3);
}

/// Rates and limits for one device class.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct FlightTuning {
    /// Yaw rate while a rotate action is held (rad/s).
    pub turn_rate: f32,
    /// Speed at session start and after a restart.
    pub default_speed: f32,
    /// Lower speed bound.
    pub min_speed: f32,
    /// Upper speed bound.
    pub max_speed: f32,
    /// Speed change per second while speed-up/down is held.
    pub speed_step: f32,
    /// Weight of a fully deflected joystick relative to a held key.
    pub joystick_factor: f32,
}

impl FlightTuning {
    /// Presets for keyboard play.
    pub fn desktop() -> Self {
        Self {
            turn_rate: 1.8,
            default_speed: 5.0,
            min_speed: 1.0,
            max_speed: 15.0,
            speed_step: 5.0,
            joystick_factor: 0.8,
        }
    }

    /// Presets for touch screens: slower, gentler.
    pub fn touch() -> Self {
        Self {
            turn_rate: 1.5,
            default_speed: 4.0,
            min_speed: 1.0,
            max_speed: 10.0,
            speed_step: 4.0,
            joystick_factor: 0.7,
        }
    }

    fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(self.min_speed, self.max_speed)
    }
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self::desktop()
    }
}

/// Mutable flight state for one drone session.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct FlightState {
    /// Position read back from the body after the last tick.
    pub position: Vec3,
    /// Accumulated heading about world Y (radians, unwrapped).
    pub yaw: f32,
    /// Velocity written to the body on the last tick.
    pub velocity: Vec3,
    /// Current speed cap, always within the tuning's bounds.
    pub speed: f32,
    /// Active camera mode.
    pub camera_mode: CameraMode,
}

/// What a tick changed besides the body itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlightOutcome {
    /// New camera mode if the toggle fired this tick.
    pub camera_mode_changed: Option<CameraMode>,
}

/// Turns [`ControlIntent`] into body velocity and heading each frame.
#[derive(Clone, Debug)]
pub struct FlightIntegrator {
    state: FlightState,
    tuning: FlightTuning,
    spawn: Vec3,
    initial_mode: CameraMode,
    toggle_was_held: bool,
}

impl FlightIntegrator {
    pub fn new(spawn: Vec3, tuning: FlightTuning, initial_mode: CameraMode) -> Self {
        Self {
            state: FlightState {
                position: spawn,
                yaw: 0.0,
                velocity: Vec3::ZERO,
                speed: tuning.clamp_speed(tuning.default_speed),
                camera_mode: initial_mode,
            },
            tuning,
            spawn,
            initial_mode,
            toggle_was_held: false,
        }
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn tuning(&self) -> &FlightTuning {
        &self.tuning
    }

    /// Swaps presets; speed restarts from the new default.
    pub fn set_tuning(&mut self, tuning: FlightTuning) {
        self.tuning = tuning;
        self.state.speed = tuning.clamp_speed(tuning.default_speed);
    }

    /// Raw (unclamped) movement direction in world space.
    fn raw_direction(&self, intent: &ControlIntent) -> Vec3 {
        let forward = math::forward_from_yaw(self.state.yaw);
        let right = math::right_from_yaw(self.state.yaw);
        let held = &intent.held;

        let mut direction = Vec3::ZERO;
        if held.forward {
            direction += forward;
        }
        if held.backward {
            direction -= forward;
        }
        if held.right {
            direction += right;
        }
        if held.left {
            direction -= right;
        }
        if held.ascend {
            direction += Vec3::Y;
        }
        if held.descend {
            direction -= Vec3::Y;
        }
        if let Some(stick) = intent.joystick {
            direction += (forward * stick.y + right * stick.x) * self.tuning.joystick_factor;
        }
        direction
    }

    /// Advances one frame.
    ///
    /// Returns `None` without touching any state when the body is not
    /// available yet.
    pub fn tick<B: PhysicsBody + ?Sized>(
        &mut self,
        intent: &ControlIntent,
        dt: f32,
        body: Option<&mut B>,
    ) -> Option<FlightOutcome> {
        let body = body?;
        let held = &intent.held;

        let omega = self.tuning.turn_rate * dt;
        if held.rotate_left {
            self.state.yaw += omega;
        }
        if held.rotate_right {
            self.state.yaw -= omega;
        }

        // Unit-or-shorter: diagonals don't go faster, partial stick stays partial.
        let direction = if intent.wants_movement() {
            self.raw_direction(intent).clamp_length_max(1.0)
        } else {
            Vec3::ZERO
        };
        self.state.velocity = direction * self.state.speed;
        body.set_velocity(self.state.velocity);
        body.set_orientation(math::yaw_rotation(self.state.yaw));

        let step = self.tuning.speed_step * dt;
        if held.speed_up {
            self.state.speed += step;
        }
        if held.speed_down {
            self.state.speed -= step;
        }
        self.state.speed = self.tuning.clamp_speed(self.state.speed);

        let mut outcome = FlightOutcome::default();
        if held.toggle_first_person && !self.toggle_was_held {
            self.state.camera_mode = self.state.camera_mode.toggled();
            outcome.camera_mode_changed = Some(self.state.camera_mode);
        }
        self.toggle_was_held = held.toggle_first_person;

        self.state.position = body.position();
        Some(outcome)
    }

    /// Returns to the spawn pose with zero velocity and yaw. The toggle edge
    /// detector is rearmed so the first press after a restart counts.
    pub fn reset<B: PhysicsBody + ?Sized>(&mut self, body: Option<&mut B>) {
        self.toggle_was_held = false;
        self.state = FlightState {
            position: self.spawn,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            speed: self.tuning.clamp_speed(self.tuning.default_speed),
            camera_mode: self.initial_mode,
        };
        if let Some(body) = body {
            body.set_position(self.spawn);
            body.set_velocity(Vec3::ZERO);
            body.set_orientation(Quat::IDENTITY);
        }
    }
}

/// In-memory body that integrates its own velocity, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
}

#[cfg(test)]
impl TestBody {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Moves by the current velocity, as a physics step would.
    pub fn step(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

#[cfg(test)]
impl PhysicsBody for TestBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn set_orientation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::intent::{Action, HeldActions};

    const DT: f32 = 1.0 / 60.0;
    const SPAWN: Vec3 = Vec3::new(21.2, 3.3, -18.0);

    fn integrator() -> FlightIntegrator {
        FlightIntegrator::new(SPAWN, FlightTuning::desktop(), CameraMode::Chase)
    }

    fn holding(actions: &[Action]) -> ControlIntent {
        let mut held = HeldActions::default();
        for action in actions {
            held.set(*action, true);
        }
        ControlIntent {
            held,
            joystick: None,
        }
    }

    #[test]
    fn idle_intent_produces_zero_velocity() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        body.velocity = Vec3::ONE;
        flight.tick(&ControlIntent::default(), DT, Some(&mut body));
        assert_eq!(flight.state().velocity, Vec3::ZERO);
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn opposing_directions_cancel() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        flight.tick(&holding(&[Action::Forward, Action::Backward]), DT, Some(&mut body));
        assert!(body.velocity.length() < 1e-6);
    }

    #[test]
    fn yaw_is_sum_of_rotation_increments() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        let omega = flight.tuning().turn_rate * DT;
        for _ in 0..10 {
            flight.tick(&holding(&[Action::RotateLeft]), DT, Some(&mut body));
        }
        assert!((flight.state().yaw - 10.0 * omega).abs() < 1e-5);

        for _ in 0..4 {
            flight.tick(&holding(&[Action::RotateRight]), DT, Some(&mut body));
        }
        assert!((flight.state().yaw - 6.0 * omega).abs() < 1e-5);

        flight.tick(
            &holding(&[Action::RotateLeft, Action::RotateRight]),
            DT,
            Some(&mut body),
        );
        assert!((flight.state().yaw - 6.0 * omega).abs() < 1e-5);
        assert!(body.rotation.angle_between(math::yaw_rotation(6.0 * omega)) < 1e-4);
    }

    #[test]
    fn diagonal_movement_is_not_faster() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        let speed = flight.state().speed;
        for combo in [
            &[Action::Forward, Action::Right][..],
            &[Action::Backward, Action::Left],
            &[Action::Forward, Action::Right, Action::Ascend],
        ] {
            flight.tick(&holding(combo), DT, Some(&mut body));
            assert!((body.velocity.length() - speed).abs() < 1e-4, "{combo:?}");
        }
    }

    #[test]
    fn forward_flight_moves_along_negative_z() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        assert_eq!(flight.state().speed, 5.0);

        let mut last_distance = 0.0;
        for _ in 0..100 {
            flight.tick(&holding(&[Action::Forward]), DT, Some(&mut body));
            assert!((flight.state().velocity - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
            body.step(DT);

            let offset = body.position - SPAWN;
            assert!(offset.x.abs() < 1e-4 && offset.y.abs() < 1e-4);
            assert!(offset.z < 0.0);
            assert!(offset.length() > last_distance);
            last_distance = offset.length();
        }
    }

    #[test]
    fn strafe_right_is_positive_x_at_zero_yaw() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        flight.tick(&holding(&[Action::Right]), DT, Some(&mut body));
        assert!((body.velocity - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn joystick_is_weaker_than_a_key() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        let intent = ControlIntent {
            held: HeldActions::default(),
            joystick: Some(Vec2::Y),
        };
        flight.tick(&intent, DT, Some(&mut body));
        let expected = 5.0 * flight.tuning().joystick_factor;
        assert!((body.velocity - Vec3::new(0.0, 0.0, -expected)).length() < 1e-4);
    }

    #[test]
    fn joystick_plus_key_is_capped_at_speed() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        let mut intent = holding(&[Action::Forward]);
        intent.joystick = Some(Vec2::new(1.0, 0.0));
        flight.tick(&intent, DT, Some(&mut body));
        assert!((body.velocity.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn speed_stays_within_bounds() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        let tuning = *flight.tuning();
        for _ in 0..5_000 {
            flight.tick(&holding(&[Action::SpeedUp]), DT, Some(&mut body));
            assert!(flight.state().speed <= tuning.max_speed);
        }
        assert_eq!(flight.state().speed, tuning.max_speed);
        for _ in 0..5_000 {
            flight.tick(&holding(&[Action::SpeedDown]), DT, Some(&mut body));
            assert!(flight.state().speed >= tuning.min_speed);
        }
        assert_eq!(flight.state().speed, tuning.min_speed);
    }

    #[test]
    fn held_toggle_flips_camera_once() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        let mut flips = 0;
        for _ in 0..30 {
            let outcome = flight
                .tick(&holding(&[Action::ToggleFirstPerson]), DT, Some(&mut body))
                .unwrap();
            if outcome.camera_mode_changed.is_some() {
                flips += 1;
            }
        }
        assert_eq!(flips, 1);
        assert_eq!(flight.state().camera_mode, CameraMode::FirstPerson);

        // Release, then press again: a second flip.
        flight.tick(&ControlIntent::default(), DT, Some(&mut body));
        let outcome = flight
            .tick(&holding(&[Action::ToggleFirstPerson]), DT, Some(&mut body))
            .unwrap();
        assert_eq!(outcome.camera_mode_changed, Some(CameraMode::Chase));
    }

    #[test]
    fn missing_body_skips_tick() {
        let mut flight = integrator();
        let before = flight.state().clone();
        let outcome = flight.tick::<TestBody>(
            &holding(&[Action::Forward, Action::RotateLeft, Action::ToggleFirstPerson]),
            DT,
            None,
        );
        assert_eq!(outcome, None);
        assert_eq!(flight.state(), &before);
    }

    #[test]
    fn position_is_read_back_from_body() {
        let mut flight = integrator();
        let mut body = TestBody::at(Vec3::new(1.0, 2.0, 3.0));
        flight.tick(&ControlIntent::default(), DT, Some(&mut body));
        assert_eq!(flight.state().position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn reset_returns_to_spawn() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        for _ in 0..20 {
            flight.tick(
                &holding(&[Action::Forward, Action::RotateLeft, Action::SpeedUp]),
                DT,
                Some(&mut body),
            );
            body.step(DT);
        }
        flight.reset(Some(&mut body));
        assert_eq!(body.position, SPAWN);
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(flight.state().yaw, 0.0);
        assert_eq!(flight.state().velocity, Vec3::ZERO);
        assert_eq!(flight.state().speed, flight.tuning().default_speed);
    }

    #[test]
    fn toggle_held_through_reset_fires_on_next_press() {
        let mut flight = integrator();
        let mut body = TestBody::at(SPAWN);
        let toggle = holding(&[Action::ToggleFirstPerson]);
        flight.tick(&toggle, DT, Some(&mut body));
        assert_eq!(flight.state().camera_mode, CameraMode::FirstPerson);

        flight.reset(Some(&mut body));
        assert_eq!(flight.state().camera_mode, CameraMode::Chase);
        let outcome = flight.tick(&toggle, DT, Some(&mut body)).unwrap();
        assert_eq!(outcome.camera_mode_changed, Some(CameraMode::FirstPerson));
    }

    #[test]
    fn switching_tuning_restarts_speed_in_new_bounds() {
        let mut flight = integrator();
        flight.set_tuning(FlightTuning::touch());
        assert_eq!(flight.state().speed, FlightTuning::touch().default_speed);
    }
}
