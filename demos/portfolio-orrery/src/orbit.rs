//! Orbit rules: circular planet and moon orbits plus a polar-form ellipse
//! for comets. Pure math, no engine state.
//!
//! Angles advance by `speed * rate * speed_factor`, where the speed factor
//! is linear in simulated time, so results do not depend on frame rate.

use glam::{Quat, Vec3};

/// Scale from simulated seconds to the per-frame "speed factor".
pub const SPEED_FACTOR_SCALE: f32 = 50.0;

pub const PLANET_ANGLE_RATE: f32 = 0.0005;
pub const MOON_ANGLE_RATE: f32 = 0.001;
pub const COMET_ANGLE_RATE: f32 = 0.0003;
/// Self-rotation per unit of rotation speed and speed factor.
pub const SPIN_RATE: f32 = 0.01;
/// Comet elevation is this fraction of the semi-major axis at full inclination.
pub const COMET_ELEVATION_SCALE: f32 = 0.3;

/// Local axis the comet tails extend along before orientation.
pub const COMET_BASE_DIRECTION: Vec3 = Vec3::NEG_X;

pub fn speed_factor(sim_dt: f32) -> f32 {
    sim_dt * SPEED_FACTOR_SCALE
}

/// Orbital angle increment for one frame.
pub fn angle_step(speed: f32, rate: f32, speed_factor: f32) -> f32 {
    speed * rate * speed_factor
}

/// Self-rotation increment for one frame.
pub fn spin_step(rotation_speed: f32, speed_factor: f32) -> f32 {
    rotation_speed * SPIN_RATE * speed_factor
}

/// Point on a circle of `distance` in the XZ plane around `center`.
pub fn circular_position(center: Vec3, angle: f32, distance: f32) -> Vec3 {
    Vec3::new(
        center.x + angle.cos() * distance,
        center.y,
        center.z + angle.sin() * distance,
    )
}

// ── Comets ───────────────────────────────────────────────────────────

/// Ellipse radius `a(1 - e²) / (1 + e·cos θ)`.
pub fn comet_radius(a: f32, e: f32, theta: f32) -> f32 {
    a * (1.0 - e * e) / (1.0 + e * theta.cos())
}

pub fn comet_position(a: f32, e: f32, inclination_deg: f32, theta: f32) -> Vec3 {
    let r = comet_radius(a, e, theta);
    Vec3::new(
        r * theta.cos(),
        theta.sin() * inclination_deg.to_radians().sin() * a * COMET_ELEVATION_SCALE,
        r * theta.sin(),
    )
}

/// Turn the tail axis toward the radial direction, then roll about it.
/// `None` when the comet sits on the origin.
pub fn comet_orientation(position: Vec3, roll: f32) -> Option<Quat> {
    if position.length_squared() <= 1e-6 {
        return None;
    }
    let radial = position.normalize();
    let align = Quat::from_rotation_arc(COMET_BASE_DIRECTION, radial);
    let roll = Quat::from_axis_angle(radial, roll);
    Some((align * roll).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn perihelion_and_aphelion() {
        let (a, e) = (180.0, 0.7);
        assert!((comet_radius(a, e, 0.0) - a * (1.0 - e)).abs() < EPSILON);
        assert!((comet_radius(a, e, PI) - a * (1.0 + e)).abs() < EPSILON);
    }

    #[test]
    fn circular_orbit_keeps_distance() {
        let center = Vec3::new(10.0, 0.0, -5.0);
        for i in 0..8 {
            let p = circular_position(center, i as f32 * 0.8, 4.0);
            assert!(((p - center).length() - 4.0).abs() < EPSILON);
        }
    }

    #[test]
    fn angle_is_time_step_invariant() {
        let (speed, multiplier) = (2.98, 1.7);
        let one = angle_step(speed, PLANET_ANGLE_RATE, speed_factor(1.0 * multiplier));
        let mut ten = 0.0;
        for _ in 0..10 {
            ten += angle_step(speed, PLANET_ANGLE_RATE, speed_factor(0.1 * multiplier));
        }
        assert!((one - ten).abs() < 1e-5);
        // closed form: speed * rate * 50 * t * s
        assert!((one - speed * PLANET_ANGLE_RATE * 50.0 * multiplier).abs() < 1e-6);
    }

    #[test]
    fn comet_elevation_follows_inclination() {
        let p = comet_position(100.0, 0.5, 30.0, PI / 2.0);
        assert!((p.y - 100.0 * 0.5 * 0.3).abs() < EPSILON);
        let flat = comet_position(100.0, 0.5, 0.0, PI / 2.0);
        assert!(flat.y.abs() < EPSILON);
    }

    #[test]
    fn orientation_points_tail_axis_outward() {
        let pos = Vec3::new(3.0, 1.0, -4.0);
        let q = comet_orientation(pos, 0.0).unwrap();
        let axis = q * COMET_BASE_DIRECTION;
        assert!((axis - pos.normalize()).length() < EPSILON);
    }

    #[test]
    fn roll_is_applied_after_alignment() {
        let pos = Vec3::new(-2.0, 0.5, 6.0);
        let radial = pos.normalize();
        let expected = Quat::from_rotation_arc(COMET_BASE_DIRECTION, radial) * Quat::from_axis_angle(radial, 2.0);
        let q = comet_orientation(pos, 2.0).unwrap();
        assert!(q.dot(expected).abs() > 1.0 - 1e-5);
    }

    #[test]
    fn orientation_skipped_at_origin() {
        assert!(comet_orientation(Vec3::ZERO, 0.5).is_none());
    }
}
