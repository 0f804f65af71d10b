//! Per-frame input as the controller sees it.

use bevy::prelude::*;

/// Held state of the four locomotion actions at one instant.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldActions {
    pub jump: bool,
    pub sprint: bool,
    pub crouch: bool,
    pub slide: bool,
}

/// Edges and hold state of one logical action within a frame.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub pressed: bool,
    pub released: bool,
    pub held: bool,
}

impl ActionState {
    pub fn from_transition(was_held: bool, held: bool) -> Self {
        Self {
            pressed: held && !was_held,
            released: !held && was_held,
            held,
        }
    }
}

/// Immutable sample of the input collaborator for one frame.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Strafe axis in `[-1, 1]`, positive is right.
    pub horizontal: f32,
    /// Forward axis in `[-1, 1]`, positive is forward.
    pub vertical: f32,
    pub jump: ActionState,
    pub sprint: ActionState,
    pub crouch: ActionState,
    pub slide: ActionState,
}

impl InputSnapshot {
    /// Builds a snapshot from this frame's axes and held actions, deriving
    /// press and release edges against the previous frame.
    pub fn sample(axes: Vec2, held: HeldActions, previous: HeldActions) -> Self {
        Self {
            horizontal: axes.x.clamp(-1.0, 1.0),
            vertical: axes.y.clamp(-1.0, 1.0),
            jump: ActionState::from_transition(previous.jump, held.jump),
            sprint: ActionState::from_transition(previous.sprint, held.sprint),
            crouch: ActionState::from_transition(previous.crouch, held.crouch),
            slide: ActionState::from_transition(previous.slide, held.slide),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_edges() {
        let up = HeldActions::default();
        let down = HeldActions {
            jump: true,
            ..default()
        };

        let pressed = InputSnapshot::sample(Vec2::ZERO, down, up);
        assert!(pressed.jump.pressed && pressed.jump.held && !pressed.jump.released);

        let holding = InputSnapshot::sample(Vec2::ZERO, down, down);
        assert!(!holding.jump.pressed && holding.jump.held);

        let released = InputSnapshot::sample(Vec2::ZERO, up, down);
        assert!(released.jump.released && !released.jump.held && !released.jump.pressed);
    }

    #[test]
    fn axes_are_clamped() {
        let snapshot = InputSnapshot::sample(
            Vec2::new(3.0, -2.0),
            HeldActions::default(),
            HeldActions::default(),
        );
        assert_eq!(snapshot.horizontal, 1.0);
        assert_eq!(snapshot.vertical, -1.0);
    }
}
