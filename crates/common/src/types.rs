use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Client-area size of the viewer window, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 720,
        }
    }
}

impl WindowConfig {
    /// Width over height. A zero height is treated as one pixel.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Fixed-rate frame pacing for the render step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameTiming {
    /// Frames per second the render step is throttled to.
    pub target_fps: f64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self { target_fps: 30.0 }
    }
}

impl FrameTiming {
    /// Minimum time between two rendered frames, in milliseconds.
    pub fn frame_time_ms(&self) -> f64 {
        1000.0 / self.target_fps
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "target_fps must be positive, got {}",
                self.target_fps
            )));
        }
        Ok(())
    }
}
