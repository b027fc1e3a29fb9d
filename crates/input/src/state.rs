//! Keyboard and scroll wheel state fed from winit events.

use crate::{InputEvent, InputSource};
use glam::Vec2;
use std::collections::HashSet;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Which physical keys trigger the player's actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub pickup: KeyCode,
    pub launch: KeyCode,
    pub crouch: KeyCode,
    pub jump: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            pickup: KeyCode::KeyE,
            launch: KeyCode::KeyF,
            crouch: KeyCode::ControlLeft,
            jump: KeyCode::Space,
        }
    }
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    bindings: KeyBindings,

    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Scroll accumulated since the last `begin_frame`.
    accumulated_scroll: f32,
    /// Scroll for the current frame.
    scroll: f32,
    /// World units of zoom per scroll line.
    zoom_per_line: f32,

    /// Actions not yet handed to the controller.
    pending: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::default())
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            zoom_per_line: 1.0,
            ..Default::default()
        }
    }

    /// Scale applied to mouse wheel lines before they become zoom deltas.
    pub fn set_zoom_per_line(&mut self, zoom_per_line: f32) {
        self.zoom_per_line = zoom_per_line;
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.scroll = self.accumulated_scroll;
        self.accumulated_scroll = 0.0;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // Auto-repeat arrives as repeated presses; only the first counts
                if self.keys_held.insert(key) {
                    self.keys_pressed.insert(key);
                    self.queue_press(key);
                }
            }
            ElementState::Released => {
                if self.keys_held.remove(&key) {
                    self.queue_release(key);
                }
            }
        }
    }

    /// Process a mouse wheel movement in lines (positive = away from the user).
    pub fn process_scroll(&mut self, lines: f32) {
        if lines.is_finite() {
            self.accumulated_scroll += lines;
        }
    }

    fn queue_press(&mut self, key: KeyCode) {
        let b = self.bindings;
        let event = if key == b.pickup {
            InputEvent::Pickup
        } else if key == b.launch {
            InputEvent::LaunchItem
        } else if key == b.crouch {
            InputEvent::CrouchStarted
        } else if key == b.jump {
            InputEvent::JumpStarted
        } else {
            return;
        };
        log::trace!("Input {:?} -> {:?}", key, event);
        self.pending.push(event);
    }

    fn queue_release(&mut self, key: KeyCode) {
        let b = self.bindings;
        let event = if key == b.crouch {
            InputEvent::CrouchEnded
        } else if key == b.jump {
            InputEvent::JumpEnded
        } else {
            return;
        };
        self.pending.push(event);
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Get movement input as a normalized vector (WASD by default).
    pub fn get_movement_input(&self) -> Vec2 {
        let mut movement = Vec2::ZERO;

        if self.is_key_held(self.bindings.forward) {
            movement.y += 1.0;
        }
        if self.is_key_held(self.bindings.back) {
            movement.y -= 1.0;
        }
        if self.is_key_held(self.bindings.left) {
            movement.x -= 1.0;
        }
        if self.is_key_held(self.bindings.right) {
            movement.x += 1.0;
        }

        if movement.length_squared() > 0.0 {
            movement = movement.normalize();
        }

        movement
    }
}

impl InputSource for InputState {
    fn movement(&self) -> Vec2 {
        self.get_movement_input()
    }

    fn zoom_delta(&self) -> f32 {
        self.scroll * self.zoom_per_line
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_state_queues_pickup_once_per_press() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyE, ElementState::Pressed);
        // Key repeat
        input.process_keyboard(KeyCode::KeyE, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyE, ElementState::Released);

        assert_eq!(input.drain_events(), vec![InputEvent::Pickup]);
        assert!(input.drain_events().is_empty());
    }

    #[test]
    fn input_state_crouch_and_jump_report_press_and_release() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::ControlLeft, ElementState::Pressed);
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        input.process_keyboard(KeyCode::Space, ElementState::Released);
        input.process_keyboard(KeyCode::ControlLeft, ElementState::Released);

        assert_eq!(
            input.drain_events(),
            vec![
                InputEvent::CrouchStarted,
                InputEvent::JumpStarted,
                InputEvent::JumpEnded,
                InputEvent::CrouchEnded,
            ]
        );
    }

    #[test]
    fn input_state_movement_is_normalized() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyD, ElementState::Pressed);

        let movement = input.movement();
        assert!((movement.length() - 1.0).abs() < 1e-5);
        assert!(movement.x > 0.0 && movement.y > 0.0);
    }

    #[test]
    fn input_state_scroll_lands_on_next_frame() {
        let mut input = InputState::new();
        input.set_zoom_per_line(0.5);
        input.process_scroll(1.0);
        input.process_scroll(1.0);
        assert_eq!(input.zoom_delta(), 0.0);

        input.begin_frame();
        assert_eq!(input.zoom_delta(), 1.0);

        input.begin_frame();
        assert_eq!(input.zoom_delta(), 0.0);
    }

    #[test]
    fn input_state_custom_bindings() {
        let mut input = InputState::with_bindings(KeyBindings {
            launch: KeyCode::KeyQ,
            ..Default::default()
        });
        input.process_keyboard(KeyCode::KeyF, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyQ, ElementState::Pressed);
        assert_eq!(input.drain_events(), vec![InputEvent::LaunchItem]);
        assert!(input.is_key_pressed(KeyCode::KeyF));
    }
}
