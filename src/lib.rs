//! Impulse Physics – a fixed-step rigid-body engine for Rust.
//!
//! Spheres, boxes, and planes are paired by a bounding-sphere broad phase,
//! tested exactly in the narrow phase (separating axes for box-box), and
//! resolved with sequential impulses, positional correction, and sleeping.

pub mod collision;
pub mod config;
pub mod core;
pub mod debug;
pub mod dynamics;
pub mod scene;
pub mod utils;
pub mod world;

pub use glam::{Mat3, Mat4, Quat, Vec3};

pub use collision::{
    BodyPair, BroadPhase, CollisionData, Contact, ContactPoint, NarrowPhase, SATAlgorithm,
    SphereBroadPhase,
};
pub use config::WorldConfig;
pub use crate::core::{
    BodyId, BoundingSphere, MassData, Material, MaterialPairProperties, MaterialPreset, RigidBody,
    Shape, ShapeKind, Transform, Velocity,
};
pub use debug::{DebugColor, DebugDraw, DebugDrawList};
pub use dynamics::{ContactResolver, Integrator, SleepPolicy};
pub use scene::{load_scene, spawn_object, ObjectKind, SceneDescription, SceneError, SceneObject};
pub use world::{PhysicsWorld, StepReport};

use config::{DEFAULT_MAX_ACCUMULATED_TIME, DEFAULT_TIME_STEP};
use utils::logging::warn_if_frame_budget_exceeded;

/// High-level wrapper that drives a [`PhysicsWorld`] at a fixed timestep from
/// variable frame times.
pub struct PhysicsEngine {
    world: PhysicsWorld,
    time_step: f32,
    max_accumulated_time: f32,
    accumulator: f32,
    last_report: Option<StepReport>,
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

impl PhysicsEngine {
    /// Creates an engine with an empty default world. Non-positive steps fall back to the default.
    pub fn new(time_step: f32) -> Self {
        Self::with_world(PhysicsWorld::new(), time_step)
    }

    pub fn with_world(world: PhysicsWorld, time_step: f32) -> Self {
        let time_step = if time_step > 0.0 && time_step.is_finite() {
            time_step
        } else {
            DEFAULT_TIME_STEP
        };
        Self {
            world,
            time_step,
            max_accumulated_time: DEFAULT_MAX_ACCUMULATED_TIME,
            accumulator: 0.0,
            last_report: None,
        }
    }

    pub fn with_max_accumulated_time(mut self, seconds: f32) -> Self {
        self.max_accumulated_time = seconds.max(self.time_step);
        self
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Time banked toward the next fixed step.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Adds `elapsed` seconds of frame time and runs every whole step it covers.
    ///
    /// Banked time is clamped so a long stall cannot trigger an unbounded number of
    /// steps. Returns the number of steps taken.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }
        if self.accumulator > self.max_accumulated_time {
            log::debug!(
                "clamping accumulated time {:.3}s to {:.3}s",
                self.accumulator,
                self.max_accumulated_time
            );
            self.accumulator = self.max_accumulated_time;
        }

        let mut steps = 0;
        while self.accumulator >= self.time_step {
            self.accumulator -= self.time_step;
            self.step();
            steps += 1;
        }
        steps
    }

    /// Runs exactly one fixed step.
    pub fn step(&mut self) -> &StepReport {
        let report = self.world.step(self.time_step);
        warn_if_frame_budget_exceeded(report.profile.total_time, self.time_step * 1000.0);
        self.last_report.insert(report)
    }

    pub fn last_report(&self) -> Option<&StepReport> {
        self.last_report.as_ref()
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyId {
        self.world.add_body(body)
    }

    pub fn remove_body(&mut self, id: BodyId) -> Option<RigidBody> {
        self.world.remove_body(id)
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.world.body(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.world.body_mut(id)
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }
}
