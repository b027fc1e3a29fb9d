//! Error types for controller construction and configuration.

use physics::ConeCastError;
use std::path::PathBuf;
use thiserror::Error;

/// Startup failures. Nothing in the per-frame path returns an error.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("player controller needs a locomotion component")]
    MissingLocomotion,
    #[error("player controller needs a camera rig")]
    MissingCameraRig,
    #[error("invalid player config: {0}")]
    InvalidConfig(String),
    #[error("cone cast setup failed: {0}")]
    ConeCast(#[from] ConeCastError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse player config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Invalid(#[from] ControllerError),
}
