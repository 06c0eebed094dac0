//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` / `Vec3` inputs, making them straightforward to
//! unit-test.

use bevy::prelude::{Quat, Vec2, Vec3};

/// Maps a noise value from the standard `[-1, 1]` range into `[min, max]`.
///
/// Noise generators (e.g. `Fbm<Perlin>`) produce values centred around zero.
/// This linearly rescales to an arbitrary output range.
pub fn map_noise_to_range(noise_val: f64, min: f32, max: f32) -> f32 {
    min + ((noise_val as f32 + 1.0) / 2.0) * (max - min)
}

/// Orientation for a heading of `yaw` radians about the world Y axis.
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

/// Horizontal forward direction for `yaw`.
///
/// The canonical forward axis is `-Z`; positive yaw turns it towards `-X`
/// (a left turn seen from above).
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    yaw_rotation(yaw) * Vec3::NEG_Z
}

/// Horizontal strafe-right direction for `yaw` (`+X` at zero yaw).
pub fn right_from_yaw(yaw: f32) -> Vec3 {
    yaw_rotation(yaw) * Vec3::X
}

/// Fraction of the remaining distance to close this frame when smoothing
/// towards a target with the given `sharpness` (1/s).
///
/// Returns `1 - e^(-sharpness * dt)`, clamped to `[0, 1]`. A non-positive
/// `dt` yields `0` (no movement).
pub fn smoothing_factor(sharpness: f32, dt: f32) -> f32 {
    if dt <= 0.0 || sharpness <= 0.0 {
        return 0.0;
    }
    (1.0 - (-sharpness * dt).exp()).clamp(0.0, 1.0)
}

/// Clamps a 2D displacement to a circle of `max_radius`, preserving direction.
pub fn clamp_to_radius(v: Vec2, max_radius: f32) -> Vec2 {
    v.clamp_length_max(max_radius)
}

/// Zeroes an analog vector whose magnitude is below `threshold`.
pub fn apply_dead_zone(v: Vec2, threshold: f32) -> Vec2 {
    if v.length_squared() < threshold * threshold {
        Vec2::ZERO
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── map_noise_to_range ──────────────────────────────────────────

    #[test]
    fn noise_min_maps_to_range_min() {
        assert_eq!(map_noise_to_range(-1.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn noise_max_maps_to_range_max() {
        assert_eq!(map_noise_to_range(1.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn noise_zero_maps_to_midpoint() {
        let result = map_noise_to_range(0.0, 2.0, 6.0);
        assert!((result - 4.0).abs() < 1e-6);
    }

    // ── yaw helpers ─────────────────────────────────────────────────

    #[test]
    fn zero_yaw_faces_negative_z() {
        assert!((forward_from_yaw(0.0) - Vec3::NEG_Z).length() < 1e-6);
        assert!((right_from_yaw(0.0) - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn positive_yaw_turns_left() {
        let f = forward_from_yaw(std::f32::consts::FRAC_PI_2);
        assert!((f - Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    fn forward_and_right_stay_orthogonal() {
        for i in 0..16 {
            let yaw = i as f32 * 0.7;
            let dot = forward_from_yaw(yaw).dot(right_from_yaw(yaw));
            assert!(dot.abs() < 1e-5);
        }
    }

    // ── smoothing_factor ────────────────────────────────────────────

    #[test]
    fn smoothing_is_zero_without_time() {
        assert_eq!(smoothing_factor(20.0, 0.0), 0.0);
    }

    #[test]
    fn smoothing_grows_with_sharpness() {
        let slow = smoothing_factor(5.0, 1.0 / 60.0);
        let fast = smoothing_factor(30.0, 1.0 / 60.0);
        assert!(fast > slow);
        assert!(fast < 1.0);
    }

    #[test]
    fn smoothing_saturates_at_one() {
        assert!((smoothing_factor(1_000.0, 10.0) - 1.0).abs() < 1e-6);
    }

    // ── joystick helpers ────────────────────────────────────────────

    #[test]
    fn clamp_keeps_short_vectors() {
        let v = Vec2::new(10.0, -20.0);
        assert_eq!(clamp_to_radius(v, 60.0), v);
    }

    #[test]
    fn clamp_limits_long_vectors_to_radius() {
        let v = clamp_to_radius(Vec2::new(300.0, 400.0), 60.0);
        assert!((v.length() - 60.0).abs() < 1e-4);
        assert!((v.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn dead_zone_drops_small_input() {
        assert_eq!(apply_dead_zone(Vec2::new(0.05, 0.05), 0.1), Vec2::ZERO);
        let v = Vec2::new(0.2, 0.0);
        assert_eq!(apply_dead_zone(v, 0.1), v);
    }
}
