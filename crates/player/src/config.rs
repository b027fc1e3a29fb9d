//! Player tuning (zoom, look cone, hold and launch). Loaded from `player.ron` at startup.

use crate::error::{ConfigError, ControllerError};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable player settings. Every field has a default, so partial files are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Camera distance at spawn.
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: f32,
    /// How quickly the camera distance approaches its target (per second).
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,
    /// Number of frames of zoom input averaged together.
    #[serde(default = "default_zoom_buffer_size")]
    pub zoom_buffer_size: usize,
    /// Averaged zoom input at or below this magnitude is ignored.
    #[serde(default = "default_zoom_dead_zone")]
    pub zoom_dead_zone: f32,

    /// Report look rays in the frame output for debug drawing.
    #[serde(default = "default_true")]
    pub debug_visualize_rays: bool,
    /// Half-angle of the look cone in degrees.
    #[serde(default = "default_ray_cast_angle")]
    pub ray_cast_angle: f32,
    #[serde(default = "default_num_raycast_rays")]
    pub num_raycast_rays: usize,
    #[serde(default = "default_raycast_distance")]
    pub raycast_distance: f32,
    /// Where look rays start, in the player's local space.
    #[serde(default = "default_look_origin_offset")]
    pub look_origin_offset: Vec3,
    /// Where held objects are carried, in the player's local space.
    #[serde(default = "default_hold_anchor_offset")]
    pub hold_anchor_offset: Vec3,

    #[serde(default)]
    pub launch: LaunchConfig,
}

/// Radial push applied to a held object when it is launched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(default = "default_launch_force")]
    pub force: f32,
    #[serde(default = "default_launch_radius")]
    pub radius: f32,
    #[serde(default = "default_launch_upwards")]
    pub upwards_modifier: f32,
    /// How far behind the hold anchor (against the player's forward) the push originates.
    #[serde(default = "default_launch_back_offset")]
    pub back_offset: f32,
}

fn default_initial_zoom() -> f32 {
    7.6
}
fn default_zoom_speed() -> f32 {
    10.0
}
fn default_min_zoom() -> f32 {
    4.05
}
fn default_max_zoom() -> f32 {
    9.77
}
fn default_zoom_buffer_size() -> usize {
    5
}
fn default_zoom_dead_zone() -> f32 {
    0.01
}
fn default_true() -> bool {
    true
}
fn default_ray_cast_angle() -> f32 {
    25.0
}
fn default_num_raycast_rays() -> usize {
    20
}
fn default_raycast_distance() -> f32 {
    1.25
}
fn default_look_origin_offset() -> Vec3 {
    Vec3::new(0.0, 0.5, -0.2)
}
fn default_hold_anchor_offset() -> Vec3 {
    Vec3::new(0.0, 1.2, -0.7)
}
fn default_launch_force() -> f32 {
    1500.0
}
fn default_launch_radius() -> f32 {
    0.5
}
fn default_launch_upwards() -> f32 {
    0.1
}
fn default_launch_back_offset() -> f32 {
    0.2
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            force: default_launch_force(),
            radius: default_launch_radius(),
            upwards_modifier: default_launch_upwards(),
            back_offset: default_launch_back_offset(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_zoom: default_initial_zoom(),
            zoom_speed: default_zoom_speed(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_buffer_size: default_zoom_buffer_size(),
            zoom_dead_zone: default_zoom_dead_zone(),
            debug_visualize_rays: default_true(),
            ray_cast_angle: default_ray_cast_angle(),
            num_raycast_rays: default_num_raycast_rays(),
            raycast_distance: default_raycast_distance(),
            look_origin_offset: default_look_origin_offset(),
            hold_anchor_offset: default_hold_anchor_offset(),
            launch: LaunchConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No player config at {:?}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                log::warn!("Invalid player config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Read and validate config from `path`.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data)
    }

    /// Parse and validate config from RON text.
    pub fn from_ron_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the controller relies on.
    pub fn validate(&self) -> Result<(), ControllerError> {
        let invalid = |msg: String| Err(ControllerError::InvalidConfig(msg));

        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite()) || self.min_zoom >= self.max_zoom {
            return invalid(format!(
                "min_zoom ({}) must be below max_zoom ({})",
                self.min_zoom, self.max_zoom
            ));
        }
        if !self.initial_zoom.is_finite() {
            return invalid("initial_zoom must be finite".into());
        }
        if self.zoom_buffer_size == 0 {
            return invalid("zoom_buffer_size must be at least 1".into());
        }
        if self.num_raycast_rays == 0 {
            return invalid("num_raycast_rays must be at least 1".into());
        }
        for (name, value) in [
            ("zoom_speed", self.zoom_speed),
            ("zoom_dead_zone", self.zoom_dead_zone),
            ("raycast_distance", self.raycast_distance),
            ("launch.force", self.launch.force),
            ("launch.radius", self.launch.radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{} must be a non-negative number, got {}", name, value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_config_defaults_are_valid() {
        let config = PlayerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.zoom_buffer_size, 5);
        assert_eq!(config.min_zoom, 4.05);
        assert_eq!(config.max_zoom, 9.77);
        assert_eq!(config.launch.force, 1500.0);
    }

    #[test]
    fn player_config_partial_file_fills_defaults() {
        let config = PlayerConfig::from_ron_str("(zoom_speed: 4.0, launch: (force: 10.0))").unwrap();
        assert_eq!(config.zoom_speed, 4.0);
        assert_eq!(config.launch.force, 10.0);
        assert_eq!(config.launch.radius, 0.5);
        assert_eq!(config.num_raycast_rays, 20);
    }

    #[test]
    fn player_config_rejects_zero_rays() {
        let err = PlayerConfig::from_ron_str("(num_raycast_rays: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ControllerError::InvalidConfig(_))));
    }

    #[test]
    fn player_config_rejects_inverted_zoom_range() {
        let config = PlayerConfig {
            min_zoom: 9.0,
            max_zoom: 4.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn player_config_load_missing_file_uses_defaults() {
        let config = PlayerConfig::load(Path::new("definitely/not/here/player.ron"));
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn player_config_roundtrips_through_ron() {
        let config = PlayerConfig::default();
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        assert_eq!(PlayerConfig::from_ron_str(&text).unwrap(), config);
    }
}
