//! Camera placement derived from the drone pose.
//!
//! Free of ECS access: [`CameraRig::update`] takes the drone position, yaw
//! and mode, and returns the smoothed [`CameraFrame`] to copy onto the render
//! camera.

use bevy::prelude::*;

use crate::math;

/// Which view the player is using. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum CameraMode {
    /// Third-person view trailing behind and above the drone.
    #[default]
    Chase,
    /// View from the drone itself.
    FirstPerson,
}

impl CameraMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Chase => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::Chase,
        }
    }

    /// Short label for the HUD.
    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Chase => "Chase",
            CameraMode::FirstPerson => "First person",
        }
    }
}

/// Smoothed eye placement for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct CameraFrame {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is aimed at.
    pub target: Vec3,
    /// Camera orientation.
    pub rotation: Quat,
}

/// Offsets and smoothing rates for both camera modes.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct RigTuning {
    /// Chase eye offset in drone-local space (`+Z` is behind, `+Y` is up).
    pub chase_offset: Vec3,
    /// First-person eye offset in drone-local space.
    pub first_person_offset: Vec3,
    /// First-person local look direction.
    pub look_direction: Vec3,
    /// Distance to the first-person look-at point.
    pub look_distance: f32,
    /// Chase smoothing sharpness (1/s) for eye and target.
    pub chase_sharpness: f32,
    /// First-person smoothing sharpness (1/s) for eye and target.
    pub first_person_sharpness: f32,
}

impl RigTuning {
    /// Presets for mouse/keyboard play.
    pub fn desktop() -> Self {
        Self {
            chase_offset: Vec3::new(0.0, 2.0, 5.0),
            first_person_offset: Vec3::new(0.0, -0.2, 0.0),
            look_direction: Vec3::NEG_Z,
            look_distance: 10.0,
            chase_sharpness: 12.0,
            first_person_sharpness: 25.0,
        }
    }

    /// Presets for touch screens: faster convergence to hide input latency.
    pub fn touch() -> Self {
        Self {
            // ~0.3 of the remaining distance per frame at 60 Hz.
            chase_sharpness: 21.4,
            first_person_sharpness: 35.0,
            ..Self::desktop()
        }
    }

    /// Unsmoothed frame for the given pose.
    fn ideal(&self, position: Vec3, yaw: f32, mode: CameraMode) -> CameraFrame {
        let heading = math::yaw_rotation(yaw);
        match mode {
            CameraMode::Chase => {
                let eye = position + heading * self.chase_offset;
                CameraFrame {
                    eye,
                    target: position,
                    rotation: look_rotation(eye, position, heading),
                }
            }
            CameraMode::FirstPerson => {
                let eye = position + heading * self.first_person_offset;
                let look = self.look_direction.normalize_or_zero() * self.look_distance;
                CameraFrame {
                    eye,
                    target: eye + heading * look,
                    rotation: heading,
                }
            }
        }
    }
}

impl Default for RigTuning {
    fn default() -> Self {
        Self::desktop()
    }
}

/// Orientation at `eye` facing `target`, or `fallback` when they coincide.
fn look_rotation(eye: Vec3, target: Vec3, fallback: Quat) -> Quat {
    if eye.distance_squared(target) < 1e-8 {
        return fallback;
    }
    Transform::from_translation(eye)
        .looking_at(target, Vec3::Y)
        .rotation
}

/// Derives camera placement from the drone pose with per-mode smoothing.
#[derive(Clone, Debug, Default)]
pub struct CameraRig {
    tuning: RigTuning,
    frame: Option<CameraFrame>,
}

impl CameraRig {
    pub fn new(tuning: RigTuning) -> Self {
        Self {
            tuning,
            frame: None,
        }
    }

    /// Swaps smoothing presets without disturbing the current frame.
    pub fn set_tuning(&mut self, tuning: RigTuning) {
        self.tuning = tuning;
    }

    /// Forgets the smoothed state; the next update snaps to the ideal frame.
    pub fn reset(&mut self) {
        self.frame = None;
    }

    /// Advances the rig one frame.
    ///
    /// Without a position this is a no-op returning the previous frame. The
    /// first frame after construction or [`reset`](Self::reset) snaps.
    ///
    /// Chase mode smooths eye, target and the resulting look rotation. First
    /// person smooths the eye position only; look direction and rotation
    /// follow yaw directly.
    pub fn update(
        &mut self,
        position: Option<Vec3>,
        yaw: f32,
        mode: CameraMode,
        dt: f32,
    ) -> Option<CameraFrame> {
        let Some(position) = position else {
            return self.frame;
        };
        let ideal = self.tuning.ideal(position, yaw, mode);

        let next = match self.frame {
            None => ideal,
            Some(prev) => match mode {
                CameraMode::Chase => {
                    let k = math::smoothing_factor(self.tuning.chase_sharpness, dt);
                    let eye = prev.eye.lerp(ideal.eye, k);
                    let target = prev.target.lerp(ideal.target, k);
                    CameraFrame {
                        eye,
                        target,
                        rotation: look_rotation(eye, target, prev.rotation),
                    }
                }
                CameraMode::FirstPerson => {
                    let k = math::smoothing_factor(self.tuning.first_person_sharpness, dt);
                    let eye = prev.eye.lerp(ideal.eye, k);
                    // Look direction follows yaw exactly; only its origin is eased.
                    CameraFrame {
                        eye,
                        target: eye + (ideal.target - ideal.eye),
                        rotation: ideal.rotation,
                    }
                }
            },
        };

        self.frame = Some(next);
        self.frame
    }
}
