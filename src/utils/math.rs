//! Additional math helpers layered on top of `glam`.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Advances `q` along the rotation vector `v * scale` (first-order quaternion integration).
///
/// The result is not normalized; pair it with [`normalize_or_identity`].
pub fn add_scaled_vector(q: Quat, v: Vec3, scale: f32) -> Quat {
    let spin = Quat::from_xyzw(v.x * scale, v.y * scale, v.z * scale, 0.0) * q;
    Quat::from_xyzw(
        q.x + spin.x * 0.5,
        q.y + spin.y * 0.5,
        q.z + spin.z * 0.5,
        q.w + spin.w * 0.5,
    )
}

/// Normalizes a quaternion, substituting identity for a zero-length input.
pub fn normalize_or_identity(q: Quat) -> Quat {
    let length_squared = q.length_squared();
    if length_squared == 0.0 || !length_squared.is_finite() {
        return Quat::IDENTITY;
    }
    q * length_squared.sqrt().recip()
}

/// Rotates a body-space inverse inertia tensor into world space (`R · I⁻¹ · Rᵀ`).
pub fn inverse_inertia_world(rotation: Quat, inverse_inertia: Mat3) -> Mat3 {
    let r = Mat3::from_quat(rotation);
    r * inverse_inertia * r.transpose()
}

/// Rigid world matrix (unit scale) for a position and orientation.
pub fn rigid_matrix(position: Vec3, rotation: Quat) -> Mat4 {
    Mat4::from_rotation_translation(rotation, position)
}

/// Extracts the `index`-th basis axis of a rigid matrix.
pub fn matrix_axis(matrix: &Mat4, index: usize) -> Vec3 {
    matrix.col(index).truncate()
}
