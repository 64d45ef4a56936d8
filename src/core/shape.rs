use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use super::types::{InertiaTensorExt, MassData, Material, Transform};

/// Enumeration of supported collision geometries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere {
        radius: f32,
    },
    Box {
        half_extents: Vec3,
    },
    /// Half-space `normal · p <= offset`, with a unit `normal`.
    Plane {
        normal: Vec3,
        offset: f32,
    },
}

/// Variant tag of a [`Shape`], for logging and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Box,
    Plane,
}

/// Sphere enclosing a shape in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn overlaps(&self, other: &BoundingSphere) -> bool {
        let radius_sum = self.radius + other.radius;
        self.center.distance_squared(other.center) <= radius_sum * radius_sum
    }
}

impl Shape {
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere { radius }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Shape::Box { half_extents }
    }

    /// Builds a plane, normalizing `normal` (a zero normal falls back to +Y).
    pub fn plane(normal: Vec3, offset: f32) -> Self {
        Shape::Plane {
            normal: normal.try_normalize().unwrap_or(Vec3::Y),
            offset,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Box { .. } => ShapeKind::Box,
            Shape::Plane { .. } => ShapeKind::Plane,
        }
    }

    pub fn volume(&self) -> f32 {
        match self {
            Shape::Sphere { radius } => 4.0 / 3.0 * std::f32::consts::PI * radius.powi(3),
            Shape::Box { half_extents } => 8.0 * half_extents.x * half_extents.y * half_extents.z,
            Shape::Plane { .. } => 0.0,
        }
    }

    pub fn inertia_tensor(&self, mass: f32) -> Mat3 {
        match self {
            Shape::Sphere { radius } => Mat3::for_solid_sphere(*radius, mass),
            Shape::Box { half_extents } => Mat3::for_solid_box(*half_extents, mass),
            Shape::Plane { .. } => Mat3::ZERO,
        }
    }

    /// Mass data for this shape filled with `material`. Planes are always immovable.
    pub fn mass_data(&self, material: &Material) -> MassData {
        if matches!(self, Shape::Plane { .. }) {
            return MassData::infinite();
        }
        let mass = material.density * self.volume();
        MassData::new(mass, self.inertia_tensor(mass))
    }

    /// World-space bounding sphere. Planes use the largest world extent as their radius.
    pub fn bounding_sphere(&self, transform: &Transform, extents: Vec3) -> BoundingSphere {
        let radius = match self {
            Shape::Sphere { radius } => *radius,
            Shape::Box { half_extents } => half_extents.length(),
            Shape::Plane { .. } => extents.max_element(),
        };
        BoundingSphere {
            center: transform.position,
            radius,
        }
    }
}
