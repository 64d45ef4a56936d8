use glam::{Mat4, Vec3};

use crate::collision::contact::{Contact, ContactPoint};
use crate::config::SAT_PARALLEL_EPSILON;
use crate::utils::math::matrix_axis;

/// Separating axis test for two oriented boxes.
///
/// Candidate axes are numbered: 0..3 the face normals of A, 3..6 those of B,
/// and `6 + 3 * i + j` the cross product of A's axis `i` with B's axis `j`.
pub struct SATAlgorithm;

struct OrientedBox<'a> {
    half_extents: Vec3,
    matrix: &'a Mat4,
    axes: [Vec3; 3],
}

impl<'a> OrientedBox<'a> {
    fn new(half_extents: Vec3, matrix: &'a Mat4) -> Self {
        Self {
            half_extents,
            matrix,
            axes: [
                matrix_axis(matrix, 0),
                matrix_axis(matrix, 1),
                matrix_axis(matrix, 2),
            ],
        }
    }

    fn center(&self) -> Vec3 {
        matrix_axis(self.matrix, 3)
    }

    /// Half-length of the box's shadow on `axis`.
    fn project(&self, axis: Vec3) -> f32 {
        self.half_extents.x * self.axes[0].dot(axis).abs()
            + self.half_extents.y * self.axes[1].dot(axis).abs()
            + self.half_extents.z * self.axes[2].dot(axis).abs()
    }

    /// Corner picked per axis: each local coordinate is negated where `flip` says so.
    fn corner(&self, flip: impl Fn(Vec3) -> bool) -> Vec3 {
        let mut local = self.half_extents;
        for (i, axis) in self.axes.iter().enumerate() {
            if flip(*axis) {
                local[i] = -local[i];
            }
        }
        self.matrix.transform_point3(local)
    }
}

impl SATAlgorithm {
    pub const AXIS_COUNT: usize = 15;

    /// Tests two boxes and appends at most one point to `contact`.
    ///
    /// Returns the number of points added. The normal points from A toward B.
    pub fn intersect_boxes(
        half_extents_a: Vec3,
        matrix_a: &Mat4,
        half_extents_b: Vec3,
        matrix_b: &Mat4,
        contact: &mut Contact,
    ) -> usize {
        let box_a = OrientedBox::new(half_extents_a, matrix_a);
        let box_b = OrientedBox::new(half_extents_b, matrix_b);
        let to_centre = box_b.center() - box_a.center();

        let mut best_penetration = f32::MAX;
        let mut best_index = usize::MAX;
        let mut best_single_axis = usize::MAX;

        for index in 0..Self::AXIS_COUNT {
            let Some(axis) = Self::candidate_axis(&box_a, &box_b, index) else {
                continue;
            };

            let penetration =
                box_a.project(axis) + box_b.project(axis) - to_centre.dot(axis).abs();
            if penetration < 0.0 {
                return 0;
            }
            if penetration < best_penetration {
                best_penetration = penetration;
                best_index = index;
            }

            if index == 5 {
                best_single_axis = best_index;
            }
        }

        let point = match best_index {
            0..=2 => {
                let normal = Self::towards(box_a.axes[best_index], to_centre);
                let vertex = box_b.corner(|axis| axis.dot(normal) > 0.0);
                ContactPoint::new(vertex, normal, best_penetration)
            }
            3..=5 => {
                let normal_ba = Self::towards(box_b.axes[best_index - 3], -to_centre);
                let vertex = box_a.corner(|axis| axis.dot(normal_ba) > 0.0);
                ContactPoint::new(vertex, -normal_ba, best_penetration)
            }
            6..=14 => {
                let edge = best_index - 6;
                let (index_a, index_b) = (edge / 3, edge % 3);
                let axis_a = box_a.axes[index_a];
                let axis_b = box_b.axes[index_b];
                let normal = Self::towards(axis_a.cross(axis_b).normalize(), to_centre);

                let mut on_edge_a = box_a.half_extents;
                let mut on_edge_b = box_b.half_extents;
                for i in 0..3 {
                    if i == index_a {
                        on_edge_a[i] = 0.0;
                    } else if box_a.axes[i].dot(normal) < 0.0 {
                        on_edge_a[i] = -on_edge_a[i];
                    }

                    if i == index_b {
                        on_edge_b[i] = 0.0;
                    } else if box_b.axes[i].dot(normal) > 0.0 {
                        on_edge_b[i] = -on_edge_b[i];
                    }
                }

                let vertex = Self::contact_point_on_edges(
                    box_a.matrix.transform_point3(on_edge_a),
                    axis_a,
                    box_a.half_extents[index_a],
                    box_b.matrix.transform_point3(on_edge_b),
                    axis_b,
                    box_b.half_extents[index_b],
                    best_single_axis > 2,
                );
                ContactPoint::new(vertex, normal, best_penetration)
            }
            _ => return 0,
        };

        usize::from(contact.push(point))
    }

    /// Normalized candidate axis, or `None` when a cross product degenerates.
    fn candidate_axis(box_a: &OrientedBox<'_>, box_b: &OrientedBox<'_>, index: usize) -> Option<Vec3> {
        let axis = match index {
            0..=2 => box_a.axes[index],
            3..=5 => box_b.axes[index - 3],
            _ => {
                let edge = index - 6;
                box_a.axes[edge / 3].cross(box_b.axes[edge % 3])
            }
        };
        if axis.length_squared() < SAT_PARALLEL_EPSILON {
            return None;
        }
        Some(axis.normalize())
    }

    fn towards(axis: Vec3, direction: Vec3) -> Vec3 {
        if axis.dot(direction) < 0.0 {
            -axis
        } else {
            axis
        }
    }

    /// Midpoint of the closest points between two edges.
    ///
    /// Each edge passes through `point_*` along `direction_*` with half-length `size_*`.
    /// Parallel edges, or a closest point beyond either edge, fall back to
    /// `point_a` when `use_a` is set and `point_b` otherwise.
    pub fn contact_point_on_edges(
        point_a: Vec3,
        direction_a: Vec3,
        size_a: f32,
        point_b: Vec3,
        direction_b: Vec3,
        size_b: f32,
        use_a: bool,
    ) -> Vec3 {
        let fallback = if use_a { point_a } else { point_b };

        let length_a = direction_a.length_squared();
        let length_b = direction_b.length_squared();
        let cross_dot = direction_b.dot(direction_a);

        let between = point_a - point_b;
        let along_a = direction_a.dot(between);
        let along_b = direction_b.dot(between);

        let denominator = length_a * length_b - cross_dot * cross_dot;
        if denominator.abs() < SAT_PARALLEL_EPSILON {
            return fallback;
        }

        let mu_a = (cross_dot * along_b - length_b * along_a) / denominator;
        let mu_b = (length_a * along_b - cross_dot * along_a) / denominator;

        if mu_a.abs() > size_a || mu_b.abs() > size_b {
            return fallback;
        }

        let closest_a = point_a + direction_a * mu_a;
        let closest_b = point_b + direction_b * mu_b;
        (closest_a + closest_b) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::rigid_matrix;
    use approx::assert_relative_eq;
    use glam::Quat;

    fn collide(
        he_a: Vec3,
        a: (Vec3, Quat),
        he_b: Vec3,
        b: (Vec3, Quat),
    ) -> Contact {
        let mut contact = Contact::new(0, 1);
        SATAlgorithm::intersect_boxes(
            he_a,
            &rigid_matrix(a.0, a.1),
            he_b,
            &rigid_matrix(b.0, b.1),
            &mut contact,
        );
        contact
    }

    #[test]
    fn separated_boxes_produce_nothing() {
        let contact = collide(
            Vec3::splat(0.5),
            (Vec3::ZERO, Quat::IDENTITY),
            Vec3::splat(0.5),
            (Vec3::new(1.2, 0.0, 0.0), Quat::IDENTITY),
        );
        assert!(contact.is_empty());
    }

    #[test]
    fn face_of_a_reports_vertex_of_b() {
        let tilt = Quat::from_rotation_z(0.2) * Quat::from_rotation_x(0.15);
        let contact = collide(
            Vec3::new(2.0, 0.5, 2.0),
            (Vec3::ZERO, Quat::IDENTITY),
            Vec3::splat(0.5),
            (Vec3::new(0.1, 1.1, -0.05), tilt),
        );

        assert_eq!(contact.len(), 1);
        let point = contact.points()[0];
        assert_relative_eq!(point.normal.y, 1.0, epsilon = 1e-5);
        assert!(point.penetration > 0.0);
        // The reported vertex is B's lowest corner, inside A's top face.
        assert!(point.point.y < 0.5);
    }

    #[test]
    fn face_of_b_normal_still_points_from_a_to_b() {
        let contact = collide(
            Vec3::splat(1.0),
            (Vec3::ZERO, Quat::from_rotation_z(45.0f32.to_radians())),
            Vec3::splat(1.0),
            (Vec3::new(2.1, 0.0, 0.0), Quat::IDENTITY),
        );

        assert_eq!(contact.len(), 1);
        let point = contact.points()[0];
        assert_relative_eq!(point.normal.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(point.penetration, 2.0f32.sqrt() + 1.0 - 2.1, epsilon = 1e-4);
        assert_relative_eq!(point.point.x, 2.0f32.sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn crossed_edges_meet_between_boxes() {
        // Two long bars rotated so their edges cross.
        let a_rotation = Quat::from_rotation_x(45.0f32.to_radians());
        let b_rotation = Quat::from_rotation_y(90.0f32.to_radians())
            * Quat::from_rotation_x(45.0f32.to_radians());
        let reach = 0.5 * 2.0f32.sqrt();
        let contact = collide(
            Vec3::new(2.0, 0.5, 0.5),
            (Vec3::ZERO, a_rotation),
            Vec3::new(2.0, 0.5, 0.5),
            (Vec3::new(0.0, 2.0 * reach - 0.1, 0.0), b_rotation),
        );

        assert_eq!(contact.len(), 1);
        let point = contact.points()[0];
        assert_relative_eq!(point.normal.y, 1.0, epsilon = 1e-4);
        assert_relative_eq!(point.penetration, 0.1, epsilon = 1e-4);
        assert_relative_eq!(point.point.y, reach - 0.05, epsilon = 1e-4);
        assert_relative_eq!(point.point.x, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn parallel_edges_use_fallback_point() {
        let point = SATAlgorithm::contact_point_on_edges(
            Vec3::ZERO,
            Vec3::X,
            1.0,
            Vec3::Y,
            Vec3::X,
            1.0,
            true,
        );
        assert_eq!(point, Vec3::ZERO);

        let point = SATAlgorithm::contact_point_on_edges(
            Vec3::ZERO,
            Vec3::X,
            1.0,
            Vec3::Y,
            Vec3::X,
            1.0,
            false,
        );
        assert_eq!(point, Vec3::Y);
    }

    #[test]
    fn skew_edges_meet_at_midpoint() {
        let point = SATAlgorithm::contact_point_on_edges(
            Vec3::ZERO,
            Vec3::X,
            1.0,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::Z,
            1.0,
            true,
        );
        assert_relative_eq!(point.x, 0.0);
        assert_relative_eq!(point.y, 0.5);
        assert_relative_eq!(point.z, 0.0);
    }
}
