//! Movement state selection.

use bevy::prelude::*;

use super::config::MovementConfig;

#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MovementState {
    #[default]
    Walking,
    Sprinting,
    Crouching,
    Sliding,
    Airborne,
}

/// Which configured speed a state asks for.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedSelector {
    Walk,
    Sprint,
    Crouch,
    Slide,
    /// Keep whatever target the previous frame chose.
    Carry,
}

impl SpeedSelector {
    pub fn resolve(self, config: &MovementConfig, previous_target: f32) -> f32 {
        match self {
            SpeedSelector::Walk => config.walk_speed,
            SpeedSelector::Sprint => config.sprint_speed,
            SpeedSelector::Crouch => config.crouch_speed,
            SpeedSelector::Slide => config.slide_speed,
            SpeedSelector::Carry => previous_target,
        }
    }
}

/// What the state machine looks at each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateInputs {
    pub slide_active: bool,
    pub crouch_held: bool,
    pub sprint_held: bool,
    pub grounded: bool,
    pub on_slope: bool,
    pub vertical_velocity: f32,
}

/// Picks the movement state. Checked in order, first match wins:
/// sliding, crouching, sprinting, walking, airborne.
pub fn select_state(inputs: StateInputs) -> (MovementState, SpeedSelector) {
    match inputs {
        StateInputs {
            slide_active: true,
            on_slope,
            vertical_velocity,
            ..
        } => {
            let selector = if on_slope && vertical_velocity < 0.1 {
                SpeedSelector::Slide
            } else {
                SpeedSelector::Sprint
            };
            (MovementState::Sliding, selector)
        }
        StateInputs {
            grounded: true,
            crouch_held: true,
            ..
        } => (MovementState::Crouching, SpeedSelector::Crouch),
        StateInputs {
            grounded: true,
            sprint_held: true,
            ..
        } => (MovementState::Sprinting, SpeedSelector::Sprint),
        StateInputs { grounded: true, .. } => (MovementState::Walking, SpeedSelector::Walk),
        _ => (MovementState::Airborne, SpeedSelector::Carry),
    }
}

/// How the current speed should follow a newly chosen target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedPlan {
    /// Assign the target right away.
    Snap(f32),
    /// Interpolate from `from` to `to`, replacing any running ramp.
    Ramp { from: f32, to: f32 },
    /// The running ramp already heads for this target.
    Continue,
}

pub fn plan_speed(
    target: f32,
    last_target: f32,
    current: f32,
    ramp_running: bool,
    threshold: f32,
) -> SpeedPlan {
    let jump = (target - last_target).abs();
    if jump > threshold && current != 0.0 {
        SpeedPlan::Ramp {
            from: current,
            to: target,
        }
    } else if ramp_running && jump == 0.0 {
        SpeedPlan::Continue
    } else {
        SpeedPlan::Snap(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded() -> StateInputs {
        StateInputs {
            grounded: true,
            ..default()
        }
    }

    #[test]
    fn priority_order() {
        let everything = StateInputs {
            slide_active: true,
            crouch_held: true,
            sprint_held: true,
            grounded: true,
            ..default()
        };
        assert_eq!(select_state(everything).0, MovementState::Sliding);

        let crouching = StateInputs {
            slide_active: false,
            ..everything
        };
        assert_eq!(
            select_state(crouching),
            (MovementState::Crouching, SpeedSelector::Crouch)
        );

        let sprinting = StateInputs {
            crouch_held: false,
            ..crouching
        };
        assert_eq!(
            select_state(sprinting),
            (MovementState::Sprinting, SpeedSelector::Sprint)
        );

        assert_eq!(
            select_state(grounded()),
            (MovementState::Walking, SpeedSelector::Walk)
        );
    }

    #[test]
    fn airborne_ignores_sprint() {
        let inputs = StateInputs {
            sprint_held: true,
            grounded: false,
            ..default()
        };
        assert_eq!(
            select_state(inputs),
            (MovementState::Airborne, SpeedSelector::Carry)
        );
    }

    #[test]
    fn airborne_ignores_crouch() {
        let inputs = StateInputs {
            crouch_held: true,
            sprint_held: true,
            ..default()
        };
        assert_eq!(
            select_state(inputs),
            (MovementState::Airborne, SpeedSelector::Carry)
        );
    }

    #[test]
    fn slide_speed_only_when_descending_a_slope() {
        let sliding = StateInputs {
            slide_active: true,
            on_slope: true,
            vertical_velocity: -1.0,
            ..grounded()
        };
        assert_eq!(select_state(sliding).1, SpeedSelector::Slide);

        let climbing = StateInputs {
            vertical_velocity: 0.5,
            ..sliding
        };
        assert_eq!(select_state(climbing).1, SpeedSelector::Sprint);

        let flat = StateInputs {
            on_slope: false,
            ..sliding
        };
        assert_eq!(select_state(flat).1, SpeedSelector::Sprint);
    }

    #[test]
    fn carry_keeps_previous_target() {
        let config = MovementConfig::default();
        assert_eq!(SpeedSelector::Carry.resolve(&config, 12.5), 12.5);
        assert_eq!(SpeedSelector::Walk.resolve(&config, 12.5), config.walk_speed);
    }

    #[test]
    fn large_jump_ramps_unless_standing_still() {
        assert_eq!(
            plan_speed(30.0, 10.0, 10.0, false, 4.0),
            SpeedPlan::Ramp { from: 10.0, to: 30.0 }
        );
        assert_eq!(plan_speed(30.0, 10.0, 0.0, false, 4.0), SpeedPlan::Snap(30.0));
        assert_eq!(plan_speed(10.0, 7.0, 7.0, false, 4.0), SpeedPlan::Snap(10.0));
        assert_eq!(plan_speed(11.0, 7.0, 7.0, false, 4.0), SpeedPlan::Snap(11.0));
    }

    #[test]
    fn unchanged_target_lets_a_ramp_finish() {
        assert_eq!(plan_speed(30.0, 30.0, 12.0, true, 4.0), SpeedPlan::Continue);
        assert_eq!(plan_speed(30.0, 30.0, 12.0, false, 4.0), SpeedPlan::Snap(30.0));
        // a small retarget cancels the ramp and snaps
        assert_eq!(plan_speed(28.0, 30.0, 12.0, true, 4.0), SpeedPlan::Snap(28.0));
    }
}
