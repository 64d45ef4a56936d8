//! Translating declarative scene entries into bodies.
//!
//! Parsing the scene document itself is left to the host; this module consumes
//! already-decoded [`SceneObject`] values (any serde format works).

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    config::DEFAULT_GRAVITY,
    core::{
        rigidbody::{BodyId, RigidBody},
        shape::Shape,
        types::{MaterialPreset, Transform},
    },
    world::PhysicsWorld,
};

/// Errors raised while turning scene entries into bodies.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("object {index}: radius must be positive and finite, got {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("object {index}: half extents must be positive and finite, got {half_extents}")]
    InvalidHalfExtents { index: usize, half_extents: Vec3 },

    #[error("object {index}: normal {normal} cannot be normalized")]
    DegenerateNormal { index: usize, normal: Vec3 },

    #[error("unknown material preset `{0}`")]
    UnknownMaterial(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Sphere,
    #[serde(alias = "cube")]
    Box,
    #[default]
    Plane,
}

/// One entry of a scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub material: MaterialPreset,
    pub position: Vec3,
    /// Orientation hint: the body's local +Y is rotated onto this direction.
    pub normal: Vec3,
    pub half_extents: Vec3,
    pub radius: f32,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            kind: ObjectKind::Plane,
            material: MaterialPreset::Static,
            position: Vec3::ZERO,
            normal: Vec3::Y,
            half_extents: Vec3::splat(0.5),
            radius: 0.5,
        }
    }
}

impl SceneObject {
    pub fn sphere(position: Vec3, radius: f32, material: MaterialPreset) -> Self {
        Self {
            kind: ObjectKind::Sphere,
            material,
            position,
            radius,
            ..Self::default()
        }
    }

    pub fn cuboid(position: Vec3, half_extents: Vec3, material: MaterialPreset) -> Self {
        Self {
            kind: ObjectKind::Box,
            material,
            position,
            half_extents,
            ..Self::default()
        }
    }

    pub fn plane(position: Vec3, normal: Vec3) -> Self {
        Self {
            kind: ObjectKind::Plane,
            position,
            normal,
            ..Self::default()
        }
    }

    /// Replaces the material with the preset called `name`.
    pub fn with_material_name(mut self, name: &str) -> Result<Self, SceneError> {
        self.material = name.parse().map_err(SceneError::UnknownMaterial)?;
        Ok(self)
    }

    fn validate(&self, index: usize) -> Result<Vec3, SceneError> {
        let normal = self
            .normal
            .try_normalize()
            .ok_or(SceneError::DegenerateNormal {
                index,
                normal: self.normal,
            })?;

        match self.kind {
            ObjectKind::Sphere if !(self.radius.is_finite() && self.radius > 0.0) => {
                Err(SceneError::InvalidRadius {
                    index,
                    radius: self.radius,
                })
            }
            ObjectKind::Box
                if !(self.half_extents.is_finite() && self.half_extents.cmpgt(Vec3::ZERO).all()) =>
            {
                Err(SceneError::InvalidHalfExtents {
                    index,
                    half_extents: self.half_extents,
                })
            }
            _ => Ok(normal),
        }
    }

    fn build(&self, normal: Vec3) -> RigidBody {
        let shape = match self.kind {
            ObjectKind::Sphere => Shape::sphere(self.radius),
            ObjectKind::Box => Shape::cuboid(self.half_extents),
            ObjectKind::Plane => Shape::plane(normal, normal.dot(self.position)),
        };
        let transform = Transform::new(self.position, Quat::from_rotation_arc(Vec3::Y, normal));
        RigidBody::with_transform(shape, self.material.material(), transform)
    }
}

/// A whole scene: optional gravity override plus objects in spawn order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub gravity: Option<Vec3>,
    pub objects: Vec<SceneObject>,
}

/// Builds the body described by `object` and adds it to `world`.
pub fn spawn_object(world: &mut PhysicsWorld, object: &SceneObject) -> Result<BodyId, SceneError> {
    let normal = object.validate(0)?;
    Ok(world.add_body(object.build(normal)))
}

/// Validates every object, then applies gravity and spawns them in order.
///
/// Nothing is added to the world when any object is invalid.
pub fn load_scene(world: &mut PhysicsWorld, scene: &SceneDescription) -> Result<Vec<BodyId>, SceneError> {
    let normals = scene
        .objects
        .iter()
        .enumerate()
        .map(|(index, object)| object.validate(index))
        .collect::<Result<Vec<_>, _>>()?;

    world.set_gravity(scene.gravity.unwrap_or(Vec3::from_array(DEFAULT_GRAVITY)));

    let ids = scene
        .objects
        .iter()
        .zip(normals)
        .map(|(object, normal)| world.add_body(object.build(normal)))
        .collect::<Vec<_>>();
    log::debug!("loaded scene with {} objects", ids.len());
    Ok(ids)
}
