use serde::{Deserialize, Serialize};

/// Lens and control tunables handed to [`crate::Camera`] at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane distance.
    pub near_z: f32,
    /// Far clipping plane distance.
    pub far_z: f32,
    /// Base movement speed in world units per millisecond.
    pub move_speed: f32,
    pub mouse_x_sensitivity: f32,
    pub mouse_y_sensitivity: f32,
    pub stick_x_sensitivity: f32,
    pub stick_y_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 65.0,
            near_z: 0.1,
            far_z: 2000.0,
            move_speed: 0.01,
            mouse_x_sensitivity: 0.8,
            mouse_y_sensitivity: 0.8,
            stick_x_sensitivity: 8.0,
            stick_y_sensitivity: 8.0,
        }
    }
}
