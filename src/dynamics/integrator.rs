use glam::Vec3;

use crate::{
    config::DEFAULT_VELOCITY_DAMPING,
    core::rigidbody::RigidBody,
    utils::math::{add_scaled_vector, normalize_or_identity},
};

/// Semi-implicit Euler integrator: velocities are updated before positions.
#[derive(Debug, Clone)]
pub struct Integrator {
    /// Multiplicative velocity decay applied once per step.
    pub damping: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_DAMPING)
    }
}

impl Integrator {
    pub fn new(damping: f32) -> Self {
        Self { damping }
    }

    /// Advances one body by `dt`. Immovable and sleeping bodies are left untouched.
    ///
    /// Returns `true` when the body was integrated.
    pub fn integrate(&self, body: &mut RigidBody, gravity: Vec3, dt: f32) -> bool {
        if body.has_infinite_mass() || !body.is_awake() {
            return false;
        }

        let weight = gravity * body.mass_data().mass() * body.gravity_scale;
        body.add_force(weight);

        let inverse_mass = body.inverse_mass();
        let force = body.force();
        let torque = body.torque();
        let inverse_inertia = body.inverse_inertia_world();

        body.velocity.linear = body.velocity.linear * self.damping + force * (inverse_mass * dt);
        body.transform.position += body.velocity.linear * dt;

        body.velocity.angular = body.velocity.angular * self.damping + inverse_inertia * torque * dt;
        body.transform.rotation = normalize_or_identity(add_scaled_vector(
            body.transform.rotation,
            body.velocity.angular,
            dt,
        ));

        body.clear_accumulators();
        true
    }
}
