use avian3d::prelude::*;
use bevy::prelude::*;

use crate::physics::ColliderShape;

#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct LevelGeometry;

/// Static blocks of the test course: name, shape, center, tilt around X in degrees.
const BLOCKS: [(&str, ColliderShape, Vec3, f32); 4] = [
    ("Floor", ColliderShape::Cuboid(80.0, 1.0, 80.0), Vec3::new(0.0, -0.5, 0.0), 0.0),
    ("Gentle ramp", ColliderShape::Cuboid(8.0, 1.0, 16.0), Vec3::new(-8.0, 2.5, -14.0), 25.0),
    ("Steep ramp", ColliderShape::Cuboid(8.0, 1.0, 12.0), Vec3::new(8.0, 3.5, -14.0), 55.0),
    ("Platform", ColliderShape::Cuboid(8.0, 1.0, 8.0), Vec3::new(-8.0, 6.0, -26.0), 0.0),
];

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 12.0, 24.0).looking_at(Vec3::new(0.0, 2.0, -8.0), Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));

    let material = materials.add(Color::srgb(0.45, 0.5, 0.55));
    for (name, shape, center, tilt) in BLOCKS {
        commands.spawn((
            Name::new(name),
            LevelGeometry,
            RigidBody::Static,
            Collider::from(shape),
            Transform::from_translation(center)
                .with_rotation(Quat::from_rotation_x(tilt.to_radians())),
            Mesh3d(meshes.add(shape.mesh())),
            MeshMaterial3d(material.clone()),
        ));
    }
}

pub(crate) fn plugin(app: &mut App) {
    app.register_type::<LevelGeometry>()
        .add_systems(Startup, setup);
}
