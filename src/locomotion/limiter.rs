//! Speed clamping and the speedometer reading.

use bevy::prelude::*;

use super::body::CharacterBody;

/// Caps `velocity` at `max_speed`.
///
/// On a walkable slope the whole vector is capped. Anywhere else only the
/// ground-plane part is, and vertical velocity passes through untouched.
pub fn limit_velocity(velocity: Vec3, max_speed: f32, on_slope: bool) -> Vec3 {
    if on_slope {
        if velocity.length() > max_speed {
            return velocity.normalize_or_zero() * max_speed;
        }
        return velocity;
    }
    let flat = Vec3::new(velocity.x, 0.0, velocity.z);
    if flat.length() > max_speed {
        let limited = flat.normalize_or_zero() * max_speed;
        return Vec3::new(limited.x, velocity.y, limited.z);
    }
    velocity
}

/// The magnitude the speedometer shows, in the same mode as the clamp.
pub fn measured_speed(velocity: Vec3, on_slope: bool) -> f32 {
    if on_slope {
        velocity.length()
    } else {
        Vec3::new(velocity.x, 0.0, velocity.z).length()
    }
}

pub fn speed_kph(speed: f32) -> i32 {
    (speed * 2.0).round() as i32
}

pub fn format_speed(kph: i32) -> String {
    format!("Speed:{kph}kph")
}

/// Clamps the body's velocity and returns the speedometer reading taken
/// before the clamp.
pub fn limit_speed(body: &mut impl CharacterBody, max_speed: f32, on_slope: bool) -> i32 {
    let velocity = body.velocity();
    let kph = speed_kph(measured_speed(velocity, on_slope));
    let limited = limit_velocity(velocity, max_speed, on_slope);
    if limited != velocity {
        body.set_velocity(limited);
    }
    kph
}

#[cfg(test)]
mod tests {
    use super::super::body::testing::TestBody;
    use super::*;

    #[test]
    fn flat_clamp_keeps_vertical() {
        let limited = limit_velocity(Vec3::new(6.0, -9.0, 8.0), 5.0, false);
        assert!((Vec3::new(limited.x, 0.0, limited.z).length() - 5.0).abs() < 1e-5);
        assert_eq!(limited.y, -9.0);
        assert!((limited.x / limited.z - 0.75).abs() < 1e-5);
    }

    #[test]
    fn slope_clamp_caps_full_magnitude() {
        let limited = limit_velocity(Vec3::new(0.0, -6.0, 8.0), 5.0, true);
        assert!((limited.length() - 5.0).abs() < 1e-5);
        assert!((limited.y - -3.0).abs() < 1e-5);
    }

    #[test]
    fn slow_velocity_untouched() {
        let v = Vec3::new(1.0, 20.0, 1.0);
        assert_eq!(limit_velocity(v, 5.0, false), v);
    }

    #[test]
    fn zero_limit_stops_horizontal_motion() {
        let limited = limit_velocity(Vec3::new(3.0, 1.0, 0.0), 0.0, false);
        assert_eq!(limited, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn speedometer_rounds_doubled_speed() {
        assert_eq!(speed_kph(4.2), 8);
        assert_eq!(speed_kph(4.25), 9);
        assert_eq!(format_speed(17), "Speed:17kph");
    }

    #[test]
    fn reading_uses_horizontal_speed_off_slope() {
        let mut body = TestBody {
            velocity: Vec3::new(3.0, -10.0, 4.0),
            ..TestBody::on_flat_ground()
        };
        assert_eq!(limit_speed(&mut body, 100.0, false), 10);
        assert_eq!(body.velocity, Vec3::new(3.0, -10.0, 4.0));

        body.velocity = Vec3::new(0.0, -6.0, 8.0);
        assert_eq!(limit_speed(&mut body, 100.0, true), 20);
    }

    #[test]
    fn reading_is_taken_before_the_clamp() {
        let mut body = TestBody {
            velocity: Vec3::new(0.0, 0.0, -10.0),
            ..TestBody::on_flat_ground()
        };
        assert_eq!(limit_speed(&mut body, 7.0, false), 20);
        assert!((body.velocity.length() - 7.0).abs() < 1e-5);
    }
}
