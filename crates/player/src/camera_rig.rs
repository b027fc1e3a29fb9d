//! Follow camera driven by the zoom smoother.

use engine_core::{Mat4, Quat, Transform, Vec3};

/// Receives the camera placement the player controller computes.
pub trait CameraRig {
    /// Offset from the tracked target to the camera.
    fn set_follow_offset(&mut self, offset: Vec3);

    fn set_rotation(&mut self, rotation: Quat);
}

/// Camera that sits at a fixed offset from its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    pub follow_offset: Vec3,
    pub rotation: Quat,
    /// Number of placements received.
    pub updates: u32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            follow_offset: Vec3::new(0.0, 5.0, -5.0),
            rotation: Quat::IDENTITY,
            updates: 0,
        }
    }
}

impl FollowCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World transform when tracking `target`.
    ///
    /// Placements arrive in a +Z-forward frame (positive offset z is in front of
    /// the target, positive pitch looks down) and are mirrored across the XY
    /// plane into the engine's -Z-forward frame.
    pub fn transform(&self, target: Vec3) -> Transform {
        let offset = Vec3::new(self.follow_offset.x, self.follow_offset.y, -self.follow_offset.z);
        let r = self.rotation;
        let rotation = Quat::from_xyzw(-r.x, -r.y, r.z, r.w);
        Transform::from_position_rotation(target + offset, rotation)
    }

    /// Get the view matrix when tracking `target`.
    pub fn view_matrix(&self, target: Vec3) -> Mat4 {
        self.transform(target).to_matrix().inverse()
    }
}

impl CameraRig for FollowCamera {
    fn set_follow_offset(&mut self, offset: Vec3) {
        self.follow_offset = offset;
        self.updates += 1;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}
