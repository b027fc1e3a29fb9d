//! Core engine types shared by the player controller crates.
//!
//! This crate provides the foundational types used across all systems:
//! - Transform and movement reprojection
//! - Interaction state for world objects

pub mod components;
pub mod transform;

pub use components::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
