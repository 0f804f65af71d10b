//! Development tools for the game. This plugin is only enabled in dev builds.

use avian3d::prelude::PhysicsDebugPlugin;
use bevy::{input::common_conditions::input_just_pressed, prelude::*};
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use crate::locomotion::SpeedTelemetry;
use crate::locomotion::state::MovementState;
use crate::time::AppSystems;

pub(super) fn plugin(app: &mut App) {
    // Log movement state transitions.
    app.add_systems(
        Update,
        log_state_transitions.after(AppSystems::Update),
    );

    // Toggle the debug overlay for UI.
    app.add_systems(
        Update,
        toggle_debug_ui.run_if(input_just_pressed(TOGGLE_KEY)),
    );
    // Inspector and collider gizmos.
    app.add_plugins((
        EguiPlugin::default(),
        bevy_inspector_egui::quick::WorldInspectorPlugin::new(),
        PhysicsDebugPlugin::default(),
    ));
}

const TOGGLE_KEY: KeyCode = KeyCode::Backquote;

fn toggle_debug_ui(mut options: ResMut<UiDebugOptions>) {
    options.toggle();
}

fn log_state_transitions(
    telemetry: Single<&SpeedTelemetry>,
    mut last: Local<Option<MovementState>>,
) {
    let state = telemetry.0.state;
    if *last != Some(state) {
        info!("movement state: {:?} -> {:?}", *last, state);
        *last = Some(state);
    }
}
