//! Physics for the player controller, backed by Rapier3D.

pub mod collision;
pub mod cone;
pub mod physics_world;
pub mod queries;
pub mod raycast;

pub use collision::*;
pub use cone::*;
pub use physics_world::*;
pub use queries::*;
pub use raycast::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
