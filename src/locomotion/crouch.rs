use bevy::prelude::*;

use super::body::{CharacterBody, ForceMode, set_vertical_scale};

/// Shrinks the body while crouching. There is no headroom check on the way
/// back up.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct CrouchController {
    /// Vertical scale captured when the controller was built.
    standing_height: f32,
    crouched: bool,
}

impl CrouchController {
    pub fn new(standing_height: f32) -> Self {
        Self {
            standing_height,
            crouched: false,
        }
    }

    pub fn is_crouched(&self) -> bool {
        self.crouched
    }

    /// Squashes the body and nudges it down so it settles quickly.
    pub fn begin(&mut self, body: &mut impl CharacterBody, crouch_scale: f32, settle_impulse: f32) {
        set_vertical_scale(body, crouch_scale);
        body.apply_force(Vec3::NEG_Y * settle_impulse, ForceMode::Impulse);
        self.crouched = true;
    }

    /// Restores the standing height, whether or not a crouch had started.
    pub fn end(&mut self, body: &mut impl CharacterBody) {
        set_vertical_scale(body, self.standing_height);
        self.crouched = false;
    }
}
