use glam::{Mat4, Vec3};

use crate::{
    collision::{
        contact::{CollisionData, Contact, ContactPoint},
        sat::SATAlgorithm,
    },
    core::{rigidbody::RigidBody, shape::Shape, types::Transform},
    utils::math::matrix_axis,
};

/// Exact shape-pair tests producing contacts.
///
/// Each routine is written for one operand order. The reversed order runs the same
/// routine with swapped operands and negates the normals afterwards, so normals
/// always point from the first body toward the second.
pub struct NarrowPhase;

impl NarrowPhase {
    /// Collides `body_a` (at `index_a`) against `body_b` (at `index_b`).
    ///
    /// Appends one [`Contact`] to `data` when at least one point was found and
    /// returns the number of points. Unsupported pairs yield zero.
    pub fn collide(
        index_a: usize,
        body_a: &RigidBody,
        index_b: usize,
        body_b: &RigidBody,
        data: &mut CollisionData,
    ) -> usize {
        let mut contact = Contact::new(index_a, index_b);
        let ta = &body_a.transform;
        let tb = &body_b.transform;

        let swapped = match (*body_a.shape(), *body_b.shape()) {
            (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
                Self::sphere_sphere(ra, ta, rb, tb, &mut contact);
                false
            }
            (Shape::Sphere { radius }, Shape::Plane { normal, offset }) => {
                Self::sphere_plane(radius, ta, normal, offset, &mut contact);
                false
            }
            (Shape::Plane { normal, offset }, Shape::Sphere { radius }) => {
                Self::sphere_plane(radius, tb, normal, offset, &mut contact);
                true
            }
            (Shape::Box { half_extents }, Shape::Sphere { radius }) => {
                Self::box_sphere(half_extents, ta, radius, tb, &mut contact);
                false
            }
            (Shape::Sphere { radius }, Shape::Box { half_extents }) => {
                Self::box_sphere(half_extents, tb, radius, ta, &mut contact);
                true
            }
            (Shape::Box { half_extents }, Shape::Plane { normal, offset }) => {
                Self::box_plane(half_extents, ta.matrix(), normal, offset, &mut contact);
                false
            }
            (Shape::Plane { normal, offset }, Shape::Box { half_extents }) => {
                Self::box_plane(half_extents, tb.matrix(), normal, offset, &mut contact);
                true
            }
            (Shape::Box { half_extents: he_a }, Shape::Box { half_extents: he_b }) => {
                SATAlgorithm::intersect_boxes(he_a, ta.matrix(), he_b, tb.matrix(), &mut contact);
                false
            }
            (Shape::Plane { .. }, Shape::Plane { .. }) => return 0,
        };

        if contact.is_empty() {
            return 0;
        }
        if swapped {
            contact.flip_normals();
        }

        let count = contact.len();
        data.contacts.push(contact);
        count
    }

    fn sphere_sphere(
        radius_a: f32,
        transform_a: &Transform,
        radius_b: f32,
        transform_b: &Transform,
        contact: &mut Contact,
    ) {
        let delta = transform_b.position - transform_a.position;
        let distance_squared = delta.length_squared();
        let radius_sum = radius_a + radius_b;

        // Coincident centres have no usable normal.
        if distance_squared <= 0.0 || distance_squared >= radius_sum * radius_sum {
            return;
        }

        let distance = distance_squared.sqrt();
        let normal = delta / distance;
        let surface_a = transform_a.position + normal * radius_a;
        let surface_b = transform_b.position - normal * radius_b;

        contact.push(ContactPoint::new(
            (surface_a + surface_b) * 0.5,
            normal,
            radius_sum - distance,
        ));
    }

    fn sphere_plane(
        radius: f32,
        transform: &Transform,
        plane_normal: Vec3,
        plane_offset: f32,
        contact: &mut Contact,
    ) {
        let centre = transform.position;
        let distance = plane_normal.dot(centre) - radius - plane_offset;
        if distance >= 0.0 {
            return;
        }

        contact.push(ContactPoint::new(
            centre - plane_normal * radius,
            -plane_normal,
            -distance,
        ));
    }

    fn box_plane(
        half_extents: Vec3,
        matrix: &Mat4,
        plane_normal: Vec3,
        plane_offset: f32,
        contact: &mut Contact,
    ) {
        let centre = matrix_axis(matrix, 3);
        let projected_extent = half_extents.x * matrix_axis(matrix, 0).dot(plane_normal).abs()
            + half_extents.y * matrix_axis(matrix, 1).dot(plane_normal).abs()
            + half_extents.z * matrix_axis(matrix, 2).dot(plane_normal).abs();

        if plane_normal.dot(centre) - plane_offset - projected_extent > 0.0 {
            return;
        }

        for corner in BOX_CORNERS {
            let vertex = matrix.transform_point3(corner * half_extents);
            let vertex_distance = vertex.dot(plane_normal);
            if vertex_distance > plane_offset {
                continue;
            }

            let penetration = plane_offset - vertex_distance;
            contact.push(ContactPoint::new(
                vertex + plane_normal * (penetration * 0.5),
                -plane_normal,
                penetration,
            ));
        }
    }

    fn box_sphere(
        half_extents: Vec3,
        box_transform: &Transform,
        radius: f32,
        sphere_transform: &Transform,
        contact: &mut Contact,
    ) {
        let centre = sphere_transform.position;
        let local_centre = box_transform.inverse_transform_point(centre);

        if (local_centre.abs() - Vec3::splat(radius))
            .cmpgt(half_extents)
            .any()
        {
            return;
        }

        let closest = local_centre.clamp(-half_extents, half_extents);
        let distance_squared = (closest - local_centre).length_squared();
        if distance_squared > radius * radius {
            return;
        }

        if distance_squared > f32::EPSILON {
            let closest_world = box_transform.transform_point(closest);
            let distance = distance_squared.sqrt();
            contact.push(ContactPoint::new(
                closest_world,
                (centre - closest_world) / distance,
                radius - distance,
            ));
            return;
        }

        // Centre inside the box: push out through the nearest face.
        let face_distance = half_extents - local_centre.abs();
        let axis = if face_distance.x <= face_distance.y && face_distance.x <= face_distance.z {
            0
        } else if face_distance.y <= face_distance.z {
            1
        } else {
            2
        };
        let sign = if local_centre[axis] < 0.0 { -1.0 } else { 1.0 };

        let mut face_point = local_centre;
        face_point[axis] = sign * half_extents[axis];
        let mut local_normal = Vec3::ZERO;
        local_normal[axis] = sign;

        contact.push(ContactPoint::new(
            box_transform.transform_point(face_point),
            box_transform.rotation * local_normal,
            radius + face_distance[axis],
        ));
    }
}

const BOX_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
];
