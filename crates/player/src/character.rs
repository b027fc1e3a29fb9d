//! Character locomotion seen from the player controller, plus a simple
//! kinematic character for the sandbox and tests.

use engine_core::{Transform, Vec3};

/// What the player controller needs from the character it drives.
pub trait Locomotion {
    /// Desired movement direction in world space; length is the speed fraction.
    fn set_movement_direction(&mut self, direction: Vec3);

    fn crouch(&mut self);

    fn uncrouch(&mut self);

    fn jump(&mut self);

    fn stop_jumping(&mut self);

    fn up_vector(&self) -> Vec3;

    /// Camera used to reproject movement input, if the character has one.
    fn camera_transform(&self) -> Option<Transform>;

    /// Current pose of the character.
    fn transform(&self) -> Transform;
}

/// Minimal character: walks on the Y=0 plane, jumps, crouches.
#[derive(Debug, Clone)]
pub struct SimpleCharacter {
    pub transform: Transform,
    pub velocity: Vec3,
    pub move_speed: f32,
    pub crouch_multiplier: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub is_grounded: bool,
    pub is_crouching: bool,
    /// Camera transform used for reprojection, refreshed by the owner each frame.
    pub camera: Option<Transform>,
    movement_direction: Vec3,
    jump_requested: bool,
}

impl SimpleCharacter {
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            velocity: Vec3::ZERO,
            move_speed: 5.0,
            crouch_multiplier: 0.5,
            jump_force: 6.0,
            gravity: 20.0,
            is_grounded: position.y <= 0.0,
            is_crouching: false,
            camera: None,
            movement_direction: Vec3::ZERO,
            jump_requested: false,
        }
    }

    pub fn movement_direction(&self) -> Vec3 {
        self.movement_direction
    }

    /// Advance the character by `dt` seconds.
    pub fn simulate(&mut self, dt: f32) {
        let speed = if self.is_crouching {
            self.move_speed * self.crouch_multiplier
        } else {
            self.move_speed
        };

        let horizontal = self.movement_direction.clamp_length_max(1.0) * speed;
        self.velocity.x = horizontal.x;
        self.velocity.z = horizontal.z;
        if horizontal.length_squared() > 1e-6 {
            self.transform.face_direction(horizontal, Vec3::Y);
        }

        // Apply vertical movement (gravity/jump)
        if self.is_grounded {
            self.velocity.y = 0.0;
            if self.jump_requested && !self.is_crouching {
                self.velocity.y = self.jump_force;
                self.is_grounded = false;
            }
        } else {
            self.velocity.y -= self.gravity * dt;
        }

        self.transform.translate(self.velocity * dt);

        // Flat ground at Y=0
        if self.transform.position.y <= 0.0 {
            self.transform.position.y = 0.0;
            self.is_grounded = true;
        }
    }
}

impl Locomotion for SimpleCharacter {
    fn set_movement_direction(&mut self, direction: Vec3) {
        self.movement_direction = direction;
    }

    fn crouch(&mut self) {
        self.is_crouching = true;
    }

    fn uncrouch(&mut self) {
        self.is_crouching = false;
    }

    fn jump(&mut self) {
        self.jump_requested = true;
    }

    fn stop_jumping(&mut self) {
        self.jump_requested = false;
    }

    fn up_vector(&self) -> Vec3 {
        Vec3::Y
    }

    fn camera_transform(&self) -> Option<Transform> {
        self.camera
    }

    fn transform(&self) -> Transform {
        self.transform
    }
}
