//! Transform component and utilities for spatial positioning.

use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Map a point from local space (e.g. an anchor offset) into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (local * self.scale)
    }

    /// Turn around `up` so that `forward()` points along `direction` projected
    /// onto the plane of `up`. Directions parallel to `up` are ignored.
    pub fn face_direction(&mut self, direction: Vec3, up: Vec3) {
        let up = up.normalize_or_zero();
        let flat = (direction - up * direction.dot(up)).normalize_or_zero();
        if flat == Vec3::ZERO || up == Vec3::ZERO {
            return;
        }
        self.rotation = Quat::from_rotation_arc(-Vec3::Z, flat);
    }

    /// Re-express a movement vector given in "screen" axes (x = right,
    /// z = forward along -Z) relative to this transform's heading.
    ///
    /// The heading is this transform's forward projected onto the plane of
    /// `up`, so pitching a camera down never slows horizontal movement.
    /// The result keeps the input's length.
    pub fn relative_to(&self, vector: Vec3, up: Vec3) -> Vec3 {
        let up = up.normalize_or_zero();
        if up == Vec3::ZERO {
            return vector;
        }

        let mut forward = self.forward() - up * self.forward().dot(up);
        if forward.length_squared() < 1e-6 {
            // Looking straight along up: fall back to the transform's own up
            forward = self.up() - up * self.up().dot(up);
        }
        let forward = forward.normalize_or_zero();
        if forward == Vec3::ZERO {
            return vector;
        }
        let right = forward.cross(up);

        right * vector.x + up * vector.y + forward * -vector.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn transform_relative_to_identity_keeps_vector() {
        let t = Transform::default();
        let v = Vec3::new(1.0, 0.0, -1.0);
        assert!(approx(t.relative_to(v, Vec3::Y), v));
    }

    #[test]
    fn transform_relative_to_ignores_pitch() {
        // Camera pitched 60 degrees down still maps "forward" to the horizontal heading
        let t = Transform::from_position_rotation(
            Vec3::ZERO,
            Quat::from_rotation_x(-60f32.to_radians()),
        );
        let moved = t.relative_to(Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        assert!(approx(moved, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn transform_relative_to_follows_yaw() {
        // Yaw 90 degrees left: forward becomes -X
        let t = Transform::from_position_rotation(
            Vec3::ZERO,
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        let moved = t.relative_to(Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        assert!(approx(moved, Vec3::new(-1.0, 0.0, 0.0)));
        let strafe = t.relative_to(Vec3::new(1.0, 0.0, 0.0), Vec3::Y);
        assert!(approx(strafe, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn transform_point_applies_rotation() {
        let t = Transform::from_position_rotation(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::PI),
        );
        let p = t.transform_point(Vec3::new(0.0, 1.0, -2.0));
        assert!(approx(p, Vec3::new(1.0, 1.0, 2.0)));
    }

    #[test]
    fn transform_face_direction_points_forward() {
        let mut t = Transform::default();
        t.face_direction(Vec3::new(1.0, 0.5, 0.0), Vec3::Y);
        assert!(approx(t.forward(), Vec3::X));
    }
}
