//! The per-physics-step driving force.

use bevy::prelude::*;

use super::body::{CharacterBody, ForceMode};
use super::sensor::{SlopeProbe, project_on_slope};

const SLOPE_FORCE_SCALE: f32 = 20.0;
const SLOPE_ADHESION_FORCE: f32 = 80.0;
const DRIVE_FORCE_SCALE: f32 = 10.0;

/// Input axes turned into a world direction. Not normalized.
pub fn move_direction(forward: Vec3, right: Vec3, horizontal: f32, vertical: f32) -> Vec3 {
    forward * vertical + right * horizontal
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceContext {
    pub grounded: bool,
    pub sliding: bool,
    pub slope: SlopeProbe,
    pub exiting_slope: bool,
    pub vertical_velocity: f32,
    /// Current allowed speed.
    pub speed: f32,
    /// Speed the state machine asked for.
    pub target_speed: f32,
    pub air_multiplier: f32,
}

/// Continuous forces for one physics step, and the gravity flag to set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionForce {
    pub slope: Option<Vec3>,
    pub adhesion: Option<Vec3>,
    pub drive: Option<Vec3>,
    pub gravity_enabled: bool,
}

impl LocomotionForce {
    pub fn compute(direction: Vec3, ctx: &ForceContext) -> Self {
        let mut force = Self {
            gravity_enabled: !ctx.slope.on_slope,
            ..default()
        };

        if ctx.slope.on_slope && !ctx.exiting_slope {
            force.slope = Some(
                project_on_slope(direction, ctx.slope.normal)
                    * ctx.target_speed
                    * SLOPE_FORCE_SCALE,
            );
            if ctx.vertical_velocity > 0.0 {
                force.adhesion = Some(Vec3::NEG_Y * SLOPE_ADHESION_FORCE);
            }
        }

        // a grounded slide is driven by the slide session alone
        let drive = direction.normalize_or_zero() * ctx.speed * DRIVE_FORCE_SCALE;
        if ctx.grounded && !ctx.sliding {
            force.drive = Some(drive);
        } else if !ctx.grounded {
            force.drive = Some(drive * ctx.air_multiplier);
        }

        force
    }

    pub fn apply(&self, body: &mut impl CharacterBody) {
        for force in [self.slope, self.adhesion, self.drive].into_iter().flatten() {
            body.apply_force(force, ForceMode::Continuous);
        }
        body.set_gravity_enabled(self.gravity_enabled);
    }
}
