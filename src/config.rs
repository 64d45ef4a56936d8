//! Global configuration constants for the Impulse Physics engine.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default gravity vector applied in the physics world (Y-up).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.8, 0.0];

/// Default half-size of the simulated volume. Only planes use it, to size their
/// broad-phase bounding sphere.
pub const DEFAULT_WORLD_EXTENTS: [f32; 3] = [500.0, 500.0, 500.0];

/// Default fixed integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 100.0;

/// Upper bound on the time a [`crate::PhysicsEngine`] accumulates between frames.
pub const DEFAULT_MAX_ACCUMULATED_TIME: f32 = 0.2;

/// Number of velocity passes the contact resolver performs per step.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 1;

/// Multiplicative decay applied to linear and angular velocity every step.
pub const DEFAULT_VELOCITY_DAMPING: f32 = 0.99;

/// Smoothed motion below which a body falls asleep.
pub const SLEEP_EPSILON: f32 = 0.27;

/// Base of the per-second exponential smoothing of the motion score.
pub const SLEEP_MOTION_BIAS_BASE: f32 = 0.5;

/// The motion score never exceeds this multiple of [`SLEEP_EPSILON`].
pub const SLEEP_MOTION_CAP_FACTOR: f32 = 10.0;

/// Motion score given to a body when it is woken up, as a multiple of [`SLEEP_EPSILON`].
pub const WAKE_MOTION_FACTOR: f32 = 2.0;

/// Maximum angular correction, as a fraction of the projected lever arm.
pub const ANGULAR_CORRECTION_LIMIT: f32 = 0.0004;

/// Guard added to impulse denominators.
pub const IMPULSE_EPSILON: f32 = 1e-6;

/// Squared length under which a box-box cross axis counts as degenerate.
pub const SAT_PARALLEL_EPSILON: f32 = 1e-4;

/// Worst case of simultaneous points carried by a single contact.
pub const MAX_CONTACT_POINTS: usize = 15;

/// Default cap on debug draw requests recorded per step.
pub const DEFAULT_MAX_DEBUG_DRAWS: usize = 1024;

/// Runtime settings for a [`crate::PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity: Vec3,
    pub extents: Vec3,
    pub solver_iterations: u32,
    pub velocity_damping: f32,
    pub allow_sleep: bool,
    pub debug_draw: bool,
    pub max_debug_draws: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::from_array(DEFAULT_GRAVITY),
            extents: Vec3::from_array(DEFAULT_WORLD_EXTENTS),
            solver_iterations: DEFAULT_SOLVER_ITERATIONS,
            velocity_damping: DEFAULT_VELOCITY_DAMPING,
            allow_sleep: true,
            debug_draw: false,
            max_debug_draws: DEFAULT_MAX_DEBUG_DRAWS,
        }
    }
}

impl WorldConfig {
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_extents(mut self, extents: Vec3) -> Self {
        self.extents = extents;
        self
    }

    pub fn with_solver_iterations(mut self, iterations: u32) -> Self {
        self.solver_iterations = iterations.max(1);
        self
    }

    pub fn with_debug_draw(mut self, enabled: bool) -> Self {
        self.debug_draw = enabled;
        self
    }

    pub fn with_sleep(mut self, allow_sleep: bool) -> Self {
        self.allow_sleep = allow_sleep;
        self
    }
}
