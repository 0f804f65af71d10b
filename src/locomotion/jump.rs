use bevy::prelude::*;

use super::body::{CharacterBody, ForceMode};

/// Jump gating and the exiting-slope window.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpController {
    ready: bool,
    /// Set by a jump, cleared when re-armed. Suppresses slope adhesion.
    exiting_slope: bool,
}

impl Default for JumpController {
    fn default() -> Self {
        Self {
            ready: true,
            exiting_slope: false,
        }
    }
}

impl JumpController {
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn exiting_slope(&self) -> bool {
        self.exiting_slope
    }

    /// Jumps if armed. Vertical velocity is zeroed first so every jump
    /// reaches the same height.
    pub fn try_jump(&mut self, body: &mut impl CharacterBody, jump_force: f32) -> bool {
        if !self.ready {
            return false;
        }
        self.ready = false;
        self.exiting_slope = true;

        let velocity = body.velocity();
        body.set_velocity(Vec3::new(velocity.x, 0.0, velocity.z));
        body.apply_force(Vec3::Y * jump_force, ForceMode::Impulse);
        true
    }

    /// Called on grounded frames.
    pub fn rearm(&mut self) {
        self.ready = true;
        self.exiting_slope = false;
    }
}

#[cfg(test)]
mod tests {
    use super::super::body::testing::TestBody;
    use super::*;

    #[test]
    fn jump_resets_vertical_velocity_then_pushes_up() {
        let mut body = TestBody {
            velocity: Vec3::new(2.0, -7.0, 1.0),
            ..TestBody::on_flat_ground()
        };
        let mut jump = JumpController::default();

        assert!(jump.try_jump(&mut body, 6.0));
        assert_eq!(body.velocity, Vec3::new(2.0, 0.0, 1.0));
        assert_eq!(body.forces, vec![(Vec3::new(0.0, 6.0, 0.0), ForceMode::Impulse)]);
        assert!(!jump.is_ready());
        assert!(jump.exiting_slope());
    }

    #[test]
    fn cannot_jump_again_until_rearmed() {
        let mut body = TestBody::on_flat_ground();
        let mut jump = JumpController::default();
        jump.try_jump(&mut body, 6.0);
        body.clear_forces();

        assert!(!jump.try_jump(&mut body, 6.0));
        assert!(body.forces.is_empty());

        jump.rearm();
        assert!(jump.is_ready());
        assert!(!jump.exiting_slope());
        assert!(jump.try_jump(&mut body, 6.0));
    }
}
