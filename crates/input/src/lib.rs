//! Input handling: keyboard and scroll state, discrete player actions, and a
//! scripted source for deterministic runs.

pub mod scripted;
pub mod state;

pub use scripted::*;
pub use state::*;

use glam::Vec2;

/// Discrete player actions, delivered once per press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum InputEvent {
    Pickup,
    LaunchItem,
    CrouchStarted,
    CrouchEnded,
    JumpStarted,
    JumpEnded,
}

/// Continuous input sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// x = strafe right, y = forward. Length at most 1.
    pub movement: Vec2,
    /// Raw zoom delta for this frame (positive zooms in).
    pub zoom_delta: f32,
}

/// Anything that can feed the player controller.
pub trait InputSource {
    fn movement(&self) -> Vec2;

    fn zoom_delta(&self) -> f32;

    /// Discrete actions since the last call, oldest first.
    fn drain_events(&mut self) -> Vec<InputEvent>;

    fn frame_input(&self) -> FrameInput {
        FrameInput {
            movement: self.movement(),
            zoom_delta: self.zoom_delta(),
        }
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
