use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use super::shape::{BoundingSphere, Shape};
use super::types::{MassData, Material, Transform, Velocity};
use crate::config::{SLEEP_EPSILON, WAKE_MOTION_FACTOR};
use crate::utils::math::inverse_inertia_world;

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique body identifier. Ids are assigned in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(u64);

impl BodyId {
    fn next() -> Self {
        BodyId(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Rigid body: one shape, its mass data, and the kinematic state integrated by the world.
#[derive(Debug, Clone)]
pub struct RigidBody {
    id: BodyId,
    shape: Shape,
    pub transform: Transform,
    mass: MassData,
    pub material: Material,
    pub velocity: Velocity,
    force: Vec3,
    torque: Vec3,
    pub gravity_scale: f32,
    awake: bool,
    motion: f32,
}

impl RigidBody {
    /// Creates a body at the origin. Mass and inertia come from `shape` and `material.density`.
    pub fn new(shape: Shape, material: Material) -> Self {
        Self::with_transform(shape, material, Transform::default())
    }

    pub fn with_transform(shape: Shape, material: Material, mut transform: Transform) -> Self {
        transform.refresh_matrix();
        let mass = shape.mass_data(&material);
        Self {
            id: BodyId::next(),
            shape,
            transform,
            mass,
            material,
            velocity: Velocity::default(),
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            gravity_scale: 1.0,
            awake: true,
            motion: WAKE_MOTION_FACTOR * SLEEP_EPSILON,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Mutable access to the geometry. Mass data is left as computed at construction.
    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn mass_data(&self) -> &MassData {
        &self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        self.mass.inverse_mass()
    }

    pub fn has_infinite_mass(&self) -> bool {
        self.mass.is_infinite()
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn is_awake(&self) -> bool {
        self.awake
    }

    pub fn motion(&self) -> f32 {
        self.motion
    }

    pub(crate) fn set_motion(&mut self, motion: f32) {
        self.motion = motion;
    }

    /// Waking primes the motion score above the sleep threshold; sleeping zeroes velocity.
    pub fn set_awake(&mut self, awake: bool) {
        if awake {
            self.awake = true;
            self.motion = WAKE_MOTION_FACTOR * SLEEP_EPSILON;
        } else {
            self.awake = false;
            self.velocity = Velocity::default();
        }
    }

    pub fn set_velocity(&mut self, linear: Vec3, angular: Vec3) {
        self.velocity.linear = linear;
        self.velocity.angular = angular;
    }

    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub fn torque(&self) -> Vec3 {
        self.torque
    }

    pub fn add_force(&mut self, force: Vec3) {
        if self.has_infinite_mass() {
            return;
        }
        self.force += force;
        self.wake_if_sleeping();
    }

    /// Adds a force at a world-space point, deriving a torque from the lever arm.
    pub fn add_force_at_point(&mut self, force: Vec3, point: Vec3) {
        if self.has_infinite_mass() {
            return;
        }
        self.force += force;
        self.torque += (point - self.transform.position).cross(force);
        self.wake_if_sleeping();
    }

    /// Instantaneous change of momentum applied at a world-space point.
    pub fn apply_impulse(&mut self, impulse: Vec3, point: Vec3) {
        if self.has_infinite_mass() {
            return;
        }
        self.velocity.linear += impulse * self.inverse_mass();
        let lever = point - self.transform.position;
        self.velocity.angular += self.inverse_inertia_world() * lever.cross(impulse);
        self.wake_if_sleeping();
    }

    pub fn clear_accumulators(&mut self) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }

    pub fn inverse_inertia_world(&self) -> Mat3 {
        inverse_inertia_world(self.transform.rotation, self.mass.inverse_inertia())
    }

    pub fn update_transforms(&mut self) {
        self.transform.refresh_matrix();
    }

    pub fn bounding_sphere(&self, extents: Vec3) -> BoundingSphere {
        self.shape.bounding_sphere(&self.transform, extents)
    }

    fn wake_if_sleeping(&mut self) {
        if !self.awake {
            self.set_awake(true);
        }
    }
}
