use glam::Vec3;

use crate::config::MAX_CONTACT_POINTS;

/// One point of contact between two bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactPoint {
    /// World-space location.
    pub point: Vec3,
    /// Unit normal pointing from body A toward body B.
    pub normal: Vec3,
    /// Overlap depth; positive means interpenetrating.
    pub penetration: f32,
}

impl ContactPoint {
    pub fn new(point: Vec3, normal: Vec3, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }
}

/// Collision event between bodies `body_a` and `body_b` (indices into the world body list).
///
/// Points live in a fixed inline buffer of [`MAX_CONTACT_POINTS`] slots.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub body_a: usize,
    pub body_b: usize,
    points: [ContactPoint; MAX_CONTACT_POINTS],
    count: usize,
}

impl Contact {
    pub fn new(body_a: usize, body_b: usize) -> Self {
        Self {
            body_a,
            body_b,
            points: [ContactPoint::default(); MAX_CONTACT_POINTS],
            count: 0,
        }
    }

    /// Appends a point. Returns `false` (and drops the point) when the buffer is full.
    pub fn push(&mut self, point: ContactPoint) -> bool {
        if self.count == MAX_CONTACT_POINTS {
            log::warn!(
                "contact between {} and {} is full, dropping point",
                self.body_a,
                self.body_b
            );
            return false;
        }
        self.points[self.count] = point;
        self.count += 1;
        true
    }

    pub fn points(&self) -> &[ContactPoint] {
        &self.points[..self.count]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Negates every normal, used when a routine ran with its operands swapped.
    pub fn flip_normals(&mut self) {
        for point in &mut self.points[..self.count] {
            point.normal = -point.normal;
        }
    }
}

/// Contacts generated during one step, in generation order.
#[derive(Debug, Clone, Default)]
pub struct CollisionData {
    pub contacts: Vec<Contact>,
}

impl CollisionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.contacts.iter().map(Contact::len).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }
}
