use avian3d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::locomotion::body::{CharacterBody, ForceMode, ProbeHit};
use crate::time::PhysicsSystems;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ColliderShape {
    Cuboid(f32, f32, f32),
    /// Radius, then length of the straight section.
    Capsule(f32, f32),
}

impl ColliderShape {
    pub fn mesh(self) -> Mesh {
        match self {
            ColliderShape::Cuboid(x, y, z) => Cuboid::new(x, y, z).into(),
            ColliderShape::Capsule(radius, length) => Capsule3d::new(radius, length).into(),
        }
    }

    /// Distance from the center to the top or bottom.
    pub fn half_height(self) -> f32 {
        match self {
            ColliderShape::Cuboid(_, y, _) => y / 2.,
            ColliderShape::Capsule(radius, length) => radius + length / 2.,
        }
    }
}

impl From<ColliderShape> for Collider {
    fn from(value: ColliderShape) -> Self {
        match value {
            ColliderShape::Cuboid(x, y, z) => Collider::cuboid(x, y, z),
            ColliderShape::Capsule(radius, length) => Collider::capsule(radius, length),
        }
    }
}

impl Default for ColliderShape {
    fn default() -> Self {
        ColliderShape::Capsule(0.5, 1.0)
    }
}

/// Forces the controller asked for since the last physics step.
///
/// Frame-rate code can't touch avian's per-step forces, so everything is
/// queued here and handed over once per fixed step by [`flush_forces`].
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PendingForces {
    pub force: Vec3,
    pub impulse: Vec3,
}

impl PendingForces {
    pub fn add(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Continuous => self.force += force,
            ForceMode::Impulse => self.impulse += force,
        }
    }
}

/// A dynamic avian body seen through [`CharacterBody`].
pub struct AvianBody<'a, 'w, 's> {
    pub entity: Entity,
    pub position: Vec3,
    pub transform: &'a mut Transform,
    pub velocity: &'a mut LinearVelocity,
    pub damping: &'a mut LinearDamping,
    pub gravity: &'a mut GravityScale,
    pub pending: &'a mut PendingForces,
    pub spatial: &'a SpatialQuery<'w, 's>,
}

impl CharacterBody for AvianBody<'_, '_, '_> {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity.0 = velocity;
    }

    fn set_drag(&mut self, drag: f32) {
        if self.damping.0 != drag {
            self.damping.0 = drag;
        }
    }

    fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        let scale = if enabled { 1.0 } else { 0.0 };
        if self.gravity.0 != scale {
            self.gravity.0 = scale;
        }
    }

    fn apply_force(&mut self, force: Vec3, mode: ForceMode) {
        self.pending.add(force, mode);
    }

    fn probe(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> ProbeHit {
        let filter = SpatialQueryFilter::from_excluded_entities([self.entity]);
        self.spatial
            .cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| ProbeHit::hit(hit.distance, hit.normal))
            .unwrap_or_default()
    }

    fn forward(&self) -> Vec3 {
        self.transform.forward().as_vec3()
    }

    fn right(&self) -> Vec3 {
        self.transform.right().as_vec3()
    }
}

pub fn flush_forces(mut bodies: Query<(Forces, &mut PendingForces)>) {
    for (mut forces, mut pending) in &mut bodies {
        if pending.force != Vec3::ZERO {
            forces.apply_force(pending.force);
        }
        if pending.impulse != Vec3::ZERO {
            forces.apply_linear_impulse(pending.impulse);
        }
        *pending = PendingForces::default();
    }
}

pub(crate) fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default())
        .register_type::<PendingForces>()
        .add_systems(
            FixedUpdate,
            flush_forces.in_set(PhysicsSystems::FlushForces),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_forces_accumulate_by_mode() {
        let mut pending = PendingForces::default();
        pending.add(Vec3::X, ForceMode::Continuous);
        pending.add(Vec3::X, ForceMode::Continuous);
        pending.add(Vec3::Y * 5.0, ForceMode::Impulse);
        assert_eq!(pending.force, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(pending.impulse, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn capsule_half_height_includes_caps() {
        assert_eq!(ColliderShape::Capsule(0.5, 1.0).half_height(), 1.0);
        assert_eq!(ColliderShape::Cuboid(4.0, 1.0, 4.0).half_height(), 0.5);
    }
}
