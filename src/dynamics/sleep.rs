use crate::{
    config::{SLEEP_EPSILON, SLEEP_MOTION_BIAS_BASE, SLEEP_MOTION_CAP_FACTOR},
    core::rigidbody::RigidBody,
};

/// Puts bodies to sleep once their smoothed kinetic motion stays small.
#[derive(Debug, Clone)]
pub struct SleepPolicy {
    pub epsilon: f32,
    pub bias_base: f32,
    pub cap_factor: f32,
}

impl Default for SleepPolicy {
    fn default() -> Self {
        Self {
            epsilon: SLEEP_EPSILON,
            bias_base: SLEEP_MOTION_BIAS_BASE,
            cap_factor: SLEEP_MOTION_CAP_FACTOR,
        }
    }
}

impl SleepPolicy {
    /// Folds the body's current speed into its motion score.
    ///
    /// Returns `true` when the body fell asleep during this update.
    pub fn update(&self, body: &mut RigidBody, dt: f32) -> bool {
        if body.has_infinite_mass() || !body.is_awake() {
            return false;
        }

        let bias = self.bias_base.powf(dt);
        let current = body.velocity.speed_squared();
        let motion = bias * body.motion() + (1.0 - bias) * current;

        if motion < self.epsilon {
            body.set_motion(motion);
            body.set_awake(false);
            log::debug!("{} fell asleep", body.id());
            return true;
        }

        body.set_motion(motion.min(self.cap_factor * self.epsilon));
        false
    }
}
