//! Ground and slope detection.
//!
//! Two independent downward probes are cast from the body's center. The
//! shorter one decides whether the body is grounded, the longer one reads the
//! surface normal for slope handling. Near the edge of their reach they can
//! disagree: a surface between the two lengths is "on slope" without being
//! grounded. That is kept as is and not papered over.

use bevy::prelude::*;

use super::body::CharacterBody;
use super::config::MovementConfig;

/// Everything one sensing pass learned about the surface below.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct SlopeProbe {
    pub on_ground: bool,
    /// Walkable slope: `0 < angle < max_slope_angle`.
    pub on_slope: bool,
    /// Surface normal from the slope probe, zero when it missed.
    pub normal: Vec3,
    /// Angle between the normal and world up, in degrees.
    pub angle: f32,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct GroundSensor {
    pub ground_probe_length: f32,
    pub slope_probe_length: f32,
    pub max_slope_angle: f32,
}

impl GroundSensor {
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            ground_probe_length: config.ground_probe_length(),
            slope_probe_length: config.slope_probe_length(),
            max_slope_angle: config.max_slope_angle,
        }
    }

    pub fn grounded(&self, body: &impl CharacterBody) -> bool {
        body.probe(body.position(), Dir3::NEG_Y, self.ground_probe_length)
            .hit
    }

    /// Reads the slope below the body. `on_ground` is left false; use
    /// [`GroundSensor::sense`] for both probes.
    pub fn slope(&self, body: &impl CharacterBody) -> SlopeProbe {
        let hit = body.probe(body.position(), Dir3::NEG_Y, self.slope_probe_length);
        if !hit.hit {
            return SlopeProbe::default();
        }
        let angle = slope_angle(hit.normal);
        SlopeProbe {
            on_ground: false,
            on_slope: is_walkable_slope(angle, self.max_slope_angle),
            normal: hit.normal,
            angle,
        }
    }

    pub fn sense(&self, body: &impl CharacterBody) -> SlopeProbe {
        SlopeProbe {
            on_ground: self.grounded(body),
            ..self.slope(body)
        }
    }
}

/// Angle in degrees between `normal` and world up.
pub fn slope_angle(normal: Vec3) -> f32 {
    if normal == Vec3::ZERO {
        return 0.0;
    }
    Vec3::Y.angle_between(normal).to_degrees()
}

/// Flat ground (angle exactly 0) is not a slope.
pub fn is_walkable_slope(angle: f32, max_slope_angle: f32) -> bool {
    angle > 0.0 && angle < max_slope_angle
}

/// Projects `direction` onto the surface plane and normalizes it.
pub fn project_on_slope(direction: Vec3, normal: Vec3) -> Vec3 {
    if normal == Vec3::ZERO {
        return direction.normalize_or_zero();
    }
    direction.reject_from(normal).normalize_or_zero()
}
