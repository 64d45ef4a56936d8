use glam::Vec3;

use crate::{
    collision::contact::Contact,
    config::{ANGULAR_CORRECTION_LIMIT, DEFAULT_SOLVER_ITERATIONS, IMPULSE_EPSILON},
    core::{rigidbody::RigidBody, types::MaterialPairProperties},
    debug::{DebugColor, DebugDrawList},
    dynamics::friction::{apply_tangential_friction, effective_inverse_mass, point_velocity},
    utils::math::{add_scaled_vector, normalize_or_identity},
};

/// Length used when drawing contact normals.
const NORMAL_DRAW_LENGTH: f32 = 2.0;

/// Sequential-impulse contact resolver with positional correction.
///
/// Per contact: wake propagation, then velocity impulses (normal and friction)
/// for every point, then positional correction.
#[derive(Debug, Clone)]
pub struct ContactResolver {
    pub iterations: u32,
    pub angular_limit: f32,
}

impl Default for ContactResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SOLVER_ITERATIONS)
    }
}

impl ContactResolver {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
            angular_limit: ANGULAR_CORRECTION_LIMIT,
        }
    }

    /// Resolves every contact in generation order.
    ///
    /// A single iteration handles each contact completely before the next one.
    /// More iterations run all velocity passes over every contact before any
    /// positional correction.
    pub fn resolve(&self, contacts: &[Contact], bodies: &mut [RigidBody], draws: &mut DebugDrawList) {
        if self.iterations <= 1 {
            for contact in contacts {
                self.resolve_contact(contact, bodies, draws);
            }
            return;
        }

        for contact in contacts {
            if let Some((a, b)) = pair_mut(bodies, contact.body_a, contact.body_b) {
                Self::resolve_awake_state(a, b);
            }
        }
        for _ in 0..self.iterations {
            for contact in contacts {
                if let Some((a, b)) = pair_mut(bodies, contact.body_a, contact.body_b) {
                    Self::resolve_velocities(contact, a, b, draws);
                }
            }
        }
        for contact in contacts {
            if let Some((a, b)) = pair_mut(bodies, contact.body_a, contact.body_b) {
                self.resolve_positions(contact, a, b);
            }
        }
    }

    /// Fully resolves one contact: awake state, velocities, then positions.
    pub fn resolve_contact(&self, contact: &Contact, bodies: &mut [RigidBody], draws: &mut DebugDrawList) {
        let Some((a, b)) = pair_mut(bodies, contact.body_a, contact.body_b) else {
            log::warn!(
                "skipping contact with invalid bodies ({}, {})",
                contact.body_a,
                contact.body_b
            );
            return;
        };

        Self::resolve_awake_state(a, b);
        Self::resolve_velocities(contact, a, b, draws);
        self.resolve_positions(contact, a, b);
    }

    /// Wakes the sleeping body of a dynamic pair where exactly one side sleeps.
    fn resolve_awake_state(a: &mut RigidBody, b: &mut RigidBody) {
        if a.has_infinite_mass() || b.has_infinite_mass() {
            return;
        }
        match (a.is_awake(), b.is_awake()) {
            (true, false) => b.set_awake(true),
            (false, true) => a.set_awake(true),
            _ => {}
        }
    }

    fn resolve_velocities(
        contact: &Contact,
        a: &mut RigidBody,
        b: &mut RigidBody,
        draws: &mut DebugDrawList,
    ) {
        if a.inverse_mass() + b.inverse_mass() == 0.0 {
            return;
        }

        let material = MaterialPairProperties::from_materials(&a.material, &b.material);
        let count = contact.len() as f32;

        for cp in contact.points() {
            let relative = point_velocity(b, cp.point) - point_velocity(a, cp.point);
            let separating = relative.dot(cp.normal);
            if separating >= 0.0 {
                continue;
            }

            let denominator = effective_inverse_mass(a, cp.point, cp.normal)
                + effective_inverse_mass(b, cp.point, cp.normal)
                + IMPULSE_EPSILON;
            let normal_impulse = -(1.0 + material.restitution) * separating / denominator / count;

            let impulse = cp.normal * normal_impulse;
            a.apply_impulse(-impulse, cp.point);
            b.apply_impulse(impulse, cp.point);

            let friction =
                apply_tangential_friction(a, b, cp.point, cp.normal, normal_impulse, &material, draws);
            if friction != Vec3::ZERO {
                draws.line(
                    cp.point,
                    cp.point + cp.normal * NORMAL_DRAW_LENGTH,
                    DebugColor::Blue,
                );
            }
        }
    }

    /// Moves both bodies apart along each point's normal in proportion to their share
    /// of the combined inverse inertia at that point.
    fn resolve_positions(&self, contact: &Contact, a: &mut RigidBody, b: &mut RigidBody) {
        if a.has_infinite_mass() && b.has_infinite_mass() {
            return;
        }

        let count = contact.len() as f32;
        for cp in contact.points() {
            let share_a = self.inertia_share(a, cp.point, cp.normal);
            let share_b = self.inertia_share(b, cp.point, cp.normal);
            let total = share_a.linear + share_a.angular + share_b.linear + share_b.angular;
            if total <= 0.0 {
                continue;
            }

            let per_unit = cp.penetration / total;
            self.apply_correction(a, &share_a, -per_unit, cp.point, cp.normal, count);
            self.apply_correction(b, &share_b, per_unit, cp.point, cp.normal, count);
        }
    }

    fn inertia_share(&self, body: &RigidBody, point: Vec3, normal: Vec3) -> InertiaShare {
        if body.has_infinite_mass() {
            return InertiaShare::default();
        }
        let linear = body.inverse_mass();
        InertiaShare {
            linear,
            angular: effective_inverse_mass(body, point, normal) - linear,
        }
    }

    fn apply_correction(
        &self,
        body: &mut RigidBody,
        share: &InertiaShare,
        per_unit: f32,
        point: Vec3,
        normal: Vec3,
        count: f32,
    ) {
        if body.has_infinite_mass() {
            return;
        }

        let mut linear_move = per_unit * share.linear;
        let mut angular_move = per_unit * share.angular;

        let lever = point - body.transform.position;
        let projection = lever - normal * lever.dot(normal);
        let max_angular = projection.length() * self.angular_limit;
        if angular_move.abs() > max_angular {
            let total_move = linear_move + angular_move;
            angular_move = angular_move.clamp(-max_angular, max_angular);
            linear_move = total_move - angular_move;
        }

        body.transform.position += normal * (linear_move / count);

        if angular_move != 0.0 && share.angular != 0.0 {
            let rotation_per_unit = body.inverse_inertia_world() * lever.cross(normal);
            let angular_change = rotation_per_unit * (angular_move / share.angular) / count;
            body.transform.rotation = normalize_or_identity(add_scaled_vector(
                body.transform.rotation,
                angular_change,
                1.0,
            ));
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct InertiaShare {
    linear: f32,
    angular: f32,
}

/// Two distinct mutable bodies out of one slice, in the requested order.
fn pair_mut(bodies: &mut [RigidBody], a: usize, b: usize) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if a == b || a >= bodies.len() || b >= bodies.len() {
        return None;
    }

    if a < b {
        let (left, right) = bodies.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = bodies.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}
