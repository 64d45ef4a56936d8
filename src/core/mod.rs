//! Core types describing bodies, shapes, and materials.

pub mod types;
pub mod shape;
pub mod rigidbody;

pub use types::{
    InertiaTensorExt, MassData, Material, MaterialPairProperties, MaterialPreset, Transform,
    Velocity,
};
pub use shape::{BoundingSphere, Shape, ShapeKind};
pub use rigidbody::{BodyId, RigidBody};
