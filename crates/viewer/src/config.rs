use std::path::Path;

use levelview_camera::CameraConfig;
use levelview_common::{load_yaml, parse_yaml, to_yaml, ConfigError, FrameTiming, WindowConfig};
use levelview_input::ControlConfig;
use levelview_render::FlashlightConfig;
use serde::{Deserialize, Serialize};

/// Top-level viewer configuration. Every section uses `#[serde(default)]`
/// so partial YAML files (e.g. only overriding `camera`) work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub timing: FrameTiming,
    pub camera: CameraConfig,
    pub controls: ControlConfig,
    pub flashlight: FlashlightConfig,
}

impl AppConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_yaml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = parse_yaml(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        to_yaml(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.timing.validate()?;

        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                cam.fov_degrees
            )));
        }
        if !(cam.near_z > 0.0 && cam.far_z > cam.near_z) {
            return Err(ConfigError::Invalid(format!(
                "camera clip planes must satisfy 0 < near_z < far_z, got {} / {}",
                cam.near_z, cam.far_z
            )));
        }
        if self.controls.sprint_multiplier <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "controls.sprint_multiplier must be positive, got {}",
                self.controls.sprint_multiplier
            )));
        }
        Ok(())
    }
}
