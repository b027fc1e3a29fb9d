//! Player interaction controller: look-cone object detection, pickup, drop
//! and launch of props, and smoothed camera zoom.

pub mod camera_rig;
pub mod character;
pub mod config;
pub mod controller;
pub mod error;
pub mod interactable;
pub mod interaction;
pub mod zoom;

pub use camera_rig::{CameraRig, FollowCamera};
pub use character::{Locomotion, SimpleCharacter};
pub use config::{LaunchConfig, PlayerConfig};
pub use controller::{DebugRay, FrameOutput, PlayerController, PlayerControllerBuilder};
pub use error::{ConfigError, ControllerError};
pub use interactable::{BoxedInteractable, Interactable, InteractableRegistry, PickupableObject};
pub use interaction::{select_hover_candidate, InteractionController, InteractionOutcome, LookFrame};
pub use zoom::{camera_pitch_degrees, camera_zoom_z, CameraPose, ZoomInputBuffer, ZoomSmoother};
