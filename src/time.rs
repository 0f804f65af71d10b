use bevy::prelude::*;

/// Frame-rate work, run once per rendered frame in this order.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum AppSystems {
    RecordInput,
    Update,
    Display,
}

/// Fixed-step work, run zero or more times per frame in this order.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum PhysicsSystems {
    Locomotion,
    FlushForces,
}

pub const PHYSICS_HZ: f64 = 60.0;

pub(crate) fn plugin(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ))
        .configure_sets(
            Update,
            (
                AppSystems::RecordInput,
                AppSystems::Update,
                AppSystems::Display,
            )
                .chain(),
        )
        .configure_sets(
            FixedUpdate,
            (PhysicsSystems::Locomotion, PhysicsSystems::FlushForces).chain(),
        );
}
