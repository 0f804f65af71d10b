//! The physics side of the controller.
//!
//! The controller never talks to a physics engine directly. Anything that owns
//! a rigid body (avian in the game, [`testing::TestBody`] in unit tests)
//! implements [`CharacterBody`] and the controller reads and writes through it.

use bevy::prelude::*;

/// How a force is handed to the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ForceMode {
    /// Integrated over the physics step it was applied in.
    Continuous,
    /// Instantaneous change in momentum.
    Impulse,
}

/// Result of a ray probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct ProbeHit {
    pub hit: bool,
    pub distance: f32,
    pub normal: Vec3,
}

impl ProbeHit {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn hit(distance: f32, normal: Vec3) -> Self {
        Self {
            hit: true,
            distance,
            normal,
        }
    }
}

/// A rigid body the locomotion controller can drive.
///
/// Position and velocity are read, velocity, drag, scale and the gravity flag
/// are written, and forces are submitted with a [`ForceMode`]. The body also
/// exposes its facing so movement input can be turned into world directions.
pub trait CharacterBody {
    fn position(&self) -> Vec3;

    fn velocity(&self) -> Vec3;

    fn set_velocity(&mut self, velocity: Vec3);

    /// Linear drag coefficient.
    fn set_drag(&mut self, drag: f32);

    fn scale(&self) -> Vec3;

    fn set_scale(&mut self, scale: Vec3);

    fn set_gravity_enabled(&mut self, enabled: bool);

    fn apply_force(&mut self, force: Vec3, mode: ForceMode);

    /// Casts a ray and reports the first surface within `max_distance`.
    fn probe(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> ProbeHit;

    /// Facing on the ground plane.
    fn forward(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    fn right(&self) -> Vec3 {
        Vec3::X
    }
}

/// Writes only the vertical component of the body's scale.
pub fn set_vertical_scale(body: &mut impl CharacterBody, y: f32) {
    let scale = body.scale();
    body.set_scale(Vec3::new(scale.x, y, scale.z));
}
