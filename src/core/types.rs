use std::fmt;
use std::str::FromStr;

use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::utils::math::rigid_matrix;

/// Position and orientation of a body, plus the cached world matrix derived from them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    #[serde(skip, default = "identity_matrix")]
    matrix: Mat4,
}

fn identity_matrix() -> Mat4 {
    Mat4::IDENTITY
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            matrix: Mat4::IDENTITY,
        }
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.rotation == other.rotation
    }
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            matrix: rigid_matrix(position, rotation),
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Cached world matrix. Valid as of the last [`Transform::refresh_matrix`].
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn refresh_matrix(&mut self) {
        self.matrix = rigid_matrix(self.position, self.rotation);
    }

    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.matrix.transform_point3(local)
    }

    /// Maps a world-space point into this transform's local frame.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }
}

/// Linear and angular velocity of a rigid body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: Vec3,
    pub angular: Vec3,
}

impl Velocity {
    pub fn speed_squared(&self) -> f32 {
        self.linear.length_squared() + self.angular.length_squared()
    }
}

/// Mass and inertia with their cached inverses.
///
/// A zero mass encodes an immovable body: both inverses are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassData {
    mass: f32,
    inverse_mass: f32,
    inertia: Mat3,
    inverse_inertia: Mat3,
}

impl Default for MassData {
    fn default() -> Self {
        Self::new(1.0, Mat3::IDENTITY)
    }
}

impl MassData {
    pub fn new(mass: f32, inertia: Mat3) -> Self {
        let mut data = Self {
            mass,
            inverse_mass: 0.0,
            inertia,
            inverse_inertia: Mat3::ZERO,
        };
        data.recompute_inverses();
        data
    }

    pub fn infinite() -> Self {
        Self::new(0.0, Mat3::ZERO)
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    pub fn inertia(&self) -> Mat3 {
        self.inertia
    }

    pub fn inverse_inertia(&self) -> Mat3 {
        self.inverse_inertia
    }

    pub fn is_infinite(&self) -> bool {
        self.inverse_mass == 0.0
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        self.recompute_inverses();
    }

    pub fn set_inertia(&mut self, inertia: Mat3) {
        self.inertia = inertia;
        self.recompute_inverses();
    }

    fn recompute_inverses(&mut self) {
        self.inverse_mass = if self.mass == 0.0 || !self.mass.is_finite() {
            0.0
        } else {
            1.0 / self.mass
        };

        let determinant = self.inertia.determinant();
        self.inverse_inertia = if self.inverse_mass == 0.0 || determinant.abs() < f32::EPSILON {
            Mat3::ZERO
        } else {
            self.inertia.inverse()
        };
    }
}

/// Surface and bulk coefficients of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub density: f32,
    pub restitution: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::rock()
    }
}

impl Material {
    pub const fn new(
        density: f32,
        restitution: f32,
        static_friction: f32,
        dynamic_friction: f32,
    ) -> Self {
        Self {
            density,
            restitution,
            static_friction,
            dynamic_friction,
        }
    }

    pub const fn rock() -> Self {
        Self::new(0.6, 0.1, 0.4, 0.5)
    }

    pub const fn wood() -> Self {
        Self::new(0.3, 0.2, 0.4, 0.5)
    }

    pub const fn metal() -> Self {
        Self::new(1.2, 0.05, 0.4, 0.5)
    }

    pub const fn pillow() -> Self {
        Self::new(0.1, 0.2, 0.4, 0.5)
    }

    pub const fn rubber() -> Self {
        Self::new(1.1, 0.828, 0.4, 0.5)
    }

    /// Zero density: bodies built from it get infinite mass.
    pub const fn static_surface() -> Self {
        Self::new(0.0, 0.4, 0.4, 0.5)
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn combine_with(&self, other: &Self) -> MaterialPairProperties {
        MaterialPairProperties::from_materials(self, other)
    }
}

/// Named material presets used by scene descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialPreset {
    Rock,
    Wood,
    Metal,
    Pillow,
    Rubber,
    #[default]
    Static,
}

impl MaterialPreset {
    pub const ALL: [MaterialPreset; 6] = [
        MaterialPreset::Rock,
        MaterialPreset::Wood,
        MaterialPreset::Metal,
        MaterialPreset::Pillow,
        MaterialPreset::Rubber,
        MaterialPreset::Static,
    ];

    pub fn material(self) -> Material {
        match self {
            MaterialPreset::Rock => Material::rock(),
            MaterialPreset::Wood => Material::wood(),
            MaterialPreset::Metal => Material::metal(),
            MaterialPreset::Pillow => Material::pillow(),
            MaterialPreset::Rubber => Material::rubber(),
            MaterialPreset::Static => Material::static_surface(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialPreset::Rock => "rock",
            MaterialPreset::Wood => "wood",
            MaterialPreset::Metal => "metal",
            MaterialPreset::Pillow => "pillow",
            MaterialPreset::Rubber => "rubber",
            MaterialPreset::Static => "static",
        }
    }
}

impl fmt::Display for MaterialPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaterialPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| name.to_string())
    }
}

/// Coefficients used when two materials touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialPairProperties {
    pub restitution: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl Default for MaterialPairProperties {
    fn default() -> Self {
        MaterialPairProperties::from_materials(&Material::default(), &Material::default())
    }
}

impl MaterialPairProperties {
    /// Arithmetic mean of each coefficient.
    pub fn from_materials(a: &Material, b: &Material) -> Self {
        Self {
            restitution: 0.5 * (a.restitution + b.restitution),
            static_friction: 0.5 * (a.static_friction + b.static_friction),
            dynamic_friction: 0.5 * (a.dynamic_friction + b.dynamic_friction),
        }
    }
}

/// Helper methods for inertia calculations.
pub trait InertiaTensorExt {
    fn for_solid_box(half_extents: Vec3, mass: f32) -> Mat3;
    fn for_solid_sphere(radius: f32, mass: f32) -> Mat3;
}

impl InertiaTensorExt for Mat3 {
    fn for_solid_box(half_extents: Vec3, mass: f32) -> Mat3 {
        let lx = half_extents.x * 2.0;
        let ly = half_extents.y * 2.0;
        let lz = half_extents.z * 2.0;
        let factor = mass / 12.0;
        Mat3::from_diagonal(Vec3::new(
            factor * (ly * ly + lz * lz),
            factor * (lx * lx + lz * lz),
            factor * (lx * lx + ly * ly),
        ))
    }

    fn for_solid_sphere(radius: f32, mass: f32) -> Mat3 {
        let value = 0.4 * mass * radius * radius;
        Mat3::from_diagonal(Vec3::splat(value))
    }
}
