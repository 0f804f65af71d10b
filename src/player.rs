use avian3d::prelude::*;
use bevy::prelude::*;
use std::fs::read_to_string;

use crate::input::{LocomotionInput, player_actions};
use crate::locomotion::config::MovementConfig;
use crate::locomotion::controller::LocomotionController;
use crate::locomotion::{PlayerLocomotion, SpeedTelemetry};
use crate::physics::{ColliderShape, PendingForces};

/// Marker for the controlled character, also its input context.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct Player;

pub const MOVEMENT_CONFIG_PATH: &str = "assets/player/movement.ron";

const CAPSULE_RADIUS: f32 = 0.5;

/// Reads the movement tunables, falling back to defaults when the file is
/// missing or malformed.
pub fn load_movement_config(path: &str) -> MovementConfig {
    info!("Looking at path: {path}");
    let Some(source) = read_to_string(path).ok() else {
        warn!("did not find a movement config, using defaults");
        return MovementConfig::default();
    };
    let config = ron::from_str::<MovementConfig>(&source)
        .map_err(|e| warn!("could not parse {path}: {e}"))
        .unwrap_or_default();
    for note in config.suspicious_values() {
        warn!("movement config: {note}");
    }
    config
}

fn player_shape(config: &MovementConfig) -> ColliderShape {
    let length = (config.player_height - 2.0 * CAPSULE_RADIUS).max(0.0);
    ColliderShape::Capsule(CAPSULE_RADIUS, length)
}

fn spawn_player(
    mut commands: Commands,
    config: Res<MovementConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let shape = player_shape(&config);
    let transform = Transform::from_xyz(0.0, 3.0, 8.0);
    let controller = LocomotionController::new(config.clone(), transform.scale.y);

    commands.spawn((
        Name::new("Player"),
        Player,
        player_actions(config.bindings),
        transform,
        (
            RigidBody::Dynamic,
            Collider::from(shape),
            LockedAxes::ROTATION_LOCKED,
            Mass(1.0),
            Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
            LinearDamping(0.0),
            GravityScale(1.0),
            TranslationInterpolation,
        ),
        (
            PlayerLocomotion(controller),
            LocomotionInput::default(),
            SpeedTelemetry::default(),
            PendingForces::default(),
        ),
        Mesh3d(meshes.add(shape.mesh())),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.55, 0.2))),
    ));
}

pub(crate) fn plugin(app: &mut App) {
    app.register_type::<Player>()
        .register_type::<MovementConfig>()
        .insert_resource(load_movement_config(MOVEMENT_CONFIG_PATH))
        .add_systems(Startup, spawn_player);
}
