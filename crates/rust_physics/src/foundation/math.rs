//! Math utilities and types
//!
//! Provides fundamental math types for 3D simulation.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Tolerance used when comparing projected distances
pub const EPSILON: f32 = 1.0e-5;

/// Transform representing position, rotation, and scale
///
/// This is the world-space placement contract the physics core consumes from
/// the scene: it reads and writes the translation and uses the rotation/scale
/// part to move local shape geometry into world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// World-space translation
    pub fn translation(&self) -> Vec3 {
        self.position
    }

    /// Overwrite the world-space translation
    pub fn set_translation(&mut self, translation: Vec3) {
        self.position = translation;
    }

    /// Apply this transform to a point (scale, rotate, then translate)
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.transform_vector(point)
    }

    /// Apply the rotation and scale of this transform to a vector
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * self.scale.component_mul(&vector)
    }

    /// Apply only the rotation of this transform to a vector
    ///
    /// Used for directions such as plane normals, which must stay unit length.
    pub fn rotate_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_transform_identity() {
        let transform = Transform::identity();

        assert_eq!(transform.position, Vec3::zeros());
        assert_relative_eq!(transform.rotation, Quat::identity(), epsilon = EPSILON);
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_transform_point_matches_matrix() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), PI / 3.0);
        let mut transform = Transform::from_position_rotation(Vec3::new(1.0, 2.0, 3.0), rotation);
        transform.scale = Vec3::new(2.0, 1.0, 0.5);

        let point = Vec3::new(0.5, -1.0, 4.0);
        let matrix = Mat4::new_translation(&transform.position)
            * transform.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&transform.scale);
        let via_matrix = matrix
            .transform_point(&nalgebra::Point3::from(point))
            .coords;

        assert_relative_eq!(transform.transform_point(point), via_matrix, epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_vector_keeps_length() {
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), PI / 2.0);
        let mut transform = Transform::from_position_rotation(Vec3::new(5.0, 0.0, 0.0), rotation);
        transform.scale = Vec3::new(3.0, 3.0, 3.0);

        let rotated = transform.rotate_vector(Vec3::x());
        assert_relative_eq!(rotated, Vec3::y(), epsilon = EPSILON);
        assert_relative_eq!(transform.transform_vector(Vec3::x()), Vec3::y() * 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_set_translation() {
        let mut transform = Transform::identity();
        transform.set_translation(Vec3::new(0.0, 7.0, 0.0));
        assert_eq!(transform.translation(), Vec3::new(0.0, 7.0, 0.0));
    }
}
