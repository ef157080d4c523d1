use levelview_camera::Camera;
use serde::{Deserialize, Serialize};

use crate::{FlashlightConstants, SpotLight};

/// Spotlight parameters for the camera flashlight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashlightConfig {
    pub color: [f32; 4],
    pub energy: f32,
    pub distance: f32,
    pub quadratic_attenuation: f32,
    pub linear_attenuation: f32,
    /// Cone angle in degrees.
    pub spot_size_degrees: f32,
    pub spot_blend: f32,
}

impl Default for FlashlightConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 0.95, 0.85, 1.0],
            energy: 1.5,
            distance: 25.0,
            quadratic_attenuation: 0.02,
            linear_attenuation: 0.1,
            spot_size_degrees: 40.0,
            spot_blend: 0.15,
        }
    }
}

/// Spotlight that rides on the camera. Off until powered.
#[derive(Debug, Clone)]
pub struct Flashlight {
    light: SpotLight,
    on: bool,
}

impl Flashlight {
    pub fn new(config: &FlashlightConfig) -> Self {
        Self {
            light: SpotLight {
                transform: glam::Mat4::IDENTITY.to_cols_array_2d(),
                color: config.color,
                energy: config.energy,
                distance: config.distance,
                quadratic_attenuation: config.quadratic_attenuation,
                linear_attenuation: config.linear_attenuation,
                spot_size: config.spot_size_degrees.to_radians(),
                spot_blend: config.spot_blend,
                _pad: [0.0; 2],
            },
            on: false,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn set_power(&mut self, on: bool) {
        if on != self.on {
            tracing::debug!(on, "flashlight power changed");
        }
        self.on = on;
    }

    /// Move the light to the camera's pose. Call after the frame's view
    /// rebuild so the basis is orthonormal.
    pub fn follow(&mut self, camera: &Camera) {
        self.light.transform = camera.world_matrix().to_cols_array_2d();
    }

    pub fn light(&self) -> &SpotLight {
        &self.light
    }

    pub fn constants(&self) -> FlashlightConstants {
        FlashlightConstants {
            light: self.light,
            power_on: [if self.on { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

impl Default for Flashlight {
    fn default() -> Self {
        Self::new(&FlashlightConfig::default())
    }
}
