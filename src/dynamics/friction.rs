use glam::Vec3;

use crate::{
    config::IMPULSE_EPSILON,
    core::{rigidbody::RigidBody, types::MaterialPairProperties},
    debug::{DebugColor, DebugDrawList},
};

/// Length used when drawing friction impulses.
const FRICTION_DRAW_SCALE: f32 = 5.0;

/// Velocity of the material point of `body` at `point`; immovable bodies report zero.
pub fn point_velocity(body: &RigidBody, point: Vec3) -> Vec3 {
    if body.has_infinite_mass() {
        return Vec3::ZERO;
    }
    let lever = point - body.transform.position;
    body.velocity.linear + body.velocity.angular.cross(lever)
}

/// Generalized inverse mass of `body` at `point` along `direction`.
pub fn effective_inverse_mass(body: &RigidBody, point: Vec3, direction: Vec3) -> f32 {
    if body.has_infinite_mass() {
        return 0.0;
    }
    let lever = point - body.transform.position;
    let angular = (body.inverse_inertia_world() * lever.cross(direction)).cross(lever);
    body.inverse_mass() + angular.dot(direction)
}

/// Coulomb friction at one contact point, applied after the normal impulse.
///
/// `normal_impulse` is the magnitude already applied along `normal` (A toward B).
/// Returns the friction impulse applied to B (A receives its negation).
pub fn apply_tangential_friction(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    point: Vec3,
    normal: Vec3,
    normal_impulse: f32,
    material: &MaterialPairProperties,
    draws: &mut DebugDrawList,
) -> Vec3 {
    let relative = point_velocity(body_b, point) - point_velocity(body_a, point);
    let Some(tangent) = (relative - normal * relative.dot(normal)).try_normalize() else {
        return Vec3::ZERO;
    };

    let denominator = effective_inverse_mass(body_a, point, tangent)
        + effective_inverse_mass(body_b, point, tangent)
        + IMPULSE_EPSILON;
    let tangent_impulse = -relative.dot(tangent) / denominator;

    let friction = if tangent_impulse.abs() < normal_impulse * material.static_friction {
        tangent * tangent_impulse
    } else {
        -tangent * (normal_impulse * material.dynamic_friction)
    };

    if friction != Vec3::ZERO {
        draws.line(point, point + friction * FRICTION_DRAW_SCALE, DebugColor::Green);
        body_a.apply_impulse(-friction, point);
        body_b.apply_impulse(friction, point);
    }
    friction
}
