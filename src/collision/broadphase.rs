use glam::Vec3;

use crate::core::{rigidbody::RigidBody, shape::BoundingSphere};

/// Candidate pair of body indices, always with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyPair {
    pub a: usize,
    pub b: usize,
}

/// Produces candidate collision pairs from the current body list.
///
/// Implementations may report false positives but never miss a resolvable pair.
pub trait BroadPhase: Send + Sync {
    fn generate_pairs(&mut self, bodies: &[RigidBody], extents: Vec3) -> Vec<BodyPair>;
}

/// Brute-force bounding-sphere overlap over every `(i, j)` with `i < j`.
#[derive(Debug, Default)]
pub struct SphereBroadPhase {
    bounds: Vec<BoundingSphere>,
}

impl SphereBroadPhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BroadPhase for SphereBroadPhase {
    fn generate_pairs(&mut self, bodies: &[RigidBody], extents: Vec3) -> Vec<BodyPair> {
        self.bounds.clear();
        self.bounds
            .extend(bodies.iter().map(|body| body.bounding_sphere(extents)));

        let mut pairs = Vec::new();
        for (i, bound_a) in self.bounds.iter().enumerate() {
            for (offset, bound_b) in self.bounds[i + 1..].iter().enumerate() {
                if bound_a.overlaps(bound_b) {
                    pairs.push(BodyPair {
                        a: i,
                        b: i + 1 + offset,
                    });
                }
            }
        }
        pairs
    }
}
