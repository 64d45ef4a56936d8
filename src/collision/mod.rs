//! Collision detection: broad-phase pruning, narrow-phase tests, and contact data.

pub mod broadphase;
pub mod contact;
pub mod narrowphase;
pub mod sat;

pub use broadphase::{BodyPair, BroadPhase, SphereBroadPhase};
pub use contact::{CollisionData, Contact, ContactPoint};
pub use narrowphase::NarrowPhase;
pub use sat::SATAlgorithm;
