//! Physics-driven player locomotion.
//!
//! The submodules hold the controller itself and know nothing about the ECS.
//! This module wires it to the player entity: one frame tick per `Update`,
//! one physics tick per `FixedUpdate` step.

pub mod body;
pub mod config;
pub mod controller;
pub mod crouch;
pub mod force;
pub mod input;
pub mod jump;
pub mod limiter;
pub mod ramp;
pub mod sensor;
pub mod slide;
pub mod state;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::input::LocomotionInput;
use crate::physics::{AvianBody, PendingForces};
use crate::time::{AppSystems, PhysicsSystems};
use controller::{FrameReport, LocomotionController};

#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct PlayerLocomotion(pub LocomotionController);

/// Result of the latest frame tick, for the speedometer.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct SpeedTelemetry(pub FrameReport);

pub(crate) fn plugin(app: &mut App) {
    app.register_type::<PlayerLocomotion>()
        .register_type::<SpeedTelemetry>()
        .add_systems(Update, frame_tick.in_set(AppSystems::Update))
        .add_systems(
            FixedUpdate,
            physics_tick.in_set(PhysicsSystems::Locomotion),
        );
}

type BodyComponents = (
    Entity,
    &'static Position,
    &'static mut Transform,
    &'static mut LinearVelocity,
    &'static mut LinearDamping,
    &'static mut GravityScale,
    &'static mut PendingForces,
);

fn frame_tick(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut players: Query<(
        &mut PlayerLocomotion,
        &LocomotionInput,
        &mut SpeedTelemetry,
        BodyComponents,
    )>,
) {
    for (mut locomotion, input, mut telemetry, body) in &mut players {
        let (entity, position, mut transform, mut velocity, mut damping, mut gravity, mut pending) =
            body;
        let mut body = AvianBody {
            entity,
            position: position.0,
            transform: &mut transform,
            velocity: &mut velocity,
            damping: &mut damping,
            gravity: &mut gravity,
            pending: &mut pending,
            spatial: &spatial_query,
        };
        telemetry.0 = locomotion
            .0
            .on_frame_tick(time.delta_secs(), &mut body, &input.snapshot);
    }
}

fn physics_tick(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut players: Query<(&mut PlayerLocomotion, BodyComponents)>,
) {
    for (mut locomotion, body) in &mut players {
        let (entity, position, mut transform, mut velocity, mut damping, mut gravity, mut pending) =
            body;
        let mut body = AvianBody {
            entity,
            position: position.0,
            transform: &mut transform,
            velocity: &mut velocity,
            damping: &mut damping,
            gravity: &mut gravity,
            pending: &mut pending,
            spatial: &spatial_query,
        };
        locomotion.0.on_physics_tick(time.delta_secs(), &mut body);
    }
}
