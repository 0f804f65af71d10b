use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use crate::locomotion::config::KeyBindings;
use crate::locomotion::input::{HeldActions, InputSnapshot};
use crate::player::Player;
use crate::time::AppSystems;

#[derive(InputAction)]
#[action_output(Vec2)]
pub struct Move;

#[derive(InputAction)]
#[action_output(bool)]
pub struct Jump;

#[derive(InputAction)]
#[action_output(bool)]
pub struct Sprint;

#[derive(InputAction)]
#[action_output(bool)]
pub struct Crouch;

#[derive(InputAction)]
#[action_output(bool)]
pub struct Slide;

/// The input snapshot the controller reads this frame.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct LocomotionInput {
    pub snapshot: InputSnapshot,
    held: HeldActions,
}

impl LocomotionInput {
    pub fn record(&mut self, axes: Vec2, held: HeldActions) {
        self.snapshot = InputSnapshot::sample(axes, held, self.held);
        self.held = held;
    }
}

/// Action entities for the player context.
///
/// Crouch and slide may be bound to the same key, so neither consumes it.
pub fn player_actions(bindings: KeyBindings) -> impl Bundle {
    actions!(Player[
        (
            Action::<Move>::new(),
            DeadZone::default(),
            Bindings::spawn((Cardinal::wasd_keys(), Axial::left_stick())),
        ),
        (Action::<Jump>::new(), bindings![bindings.jump]),
        (Action::<Sprint>::new(), bindings![bindings.sprint]),
        (
            Action::<Crouch>::new(),
            ActionSettings {
                consume_input: false,
                ..default()
            },
            bindings![bindings.crouch],
        ),
        (
            Action::<Slide>::new(),
            ActionSettings {
                consume_input: false,
                ..default()
            },
            bindings![bindings.slide],
        ),
    ])
}

fn is_held<A: InputAction<Output = bool>>(action: &Action<A>) -> bool {
    **action
}

fn record_input(
    movement: Single<&Action<Move>>,
    jump: Single<&Action<Jump>>,
    sprint: Single<&Action<Sprint>>,
    crouch: Single<&Action<Crouch>>,
    slide: Single<&Action<Slide>>,
    mut input: Single<&mut LocomotionInput, With<Player>>,
) {
    let held = HeldActions {
        jump: is_held(*jump),
        sprint: is_held(*sprint),
        crouch: is_held(*crouch),
        slide: is_held(*slide),
    };
    let axes: Vec2 = ***movement;
    input.record(axes, held);
}

pub(crate) fn plugin(app: &mut App) {
    app.add_plugins(EnhancedInputPlugin)
        .add_input_context::<Player>()
        .register_type::<LocomotionInput>()
        .add_systems(Update, record_input.in_set(AppSystems::RecordInput));
}
