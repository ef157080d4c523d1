//! GPU constant-buffer layouts. Matrices are row-major in row-vector
//! convention, matching [`levelview_camera::Camera::view_matrix_rows`].

use bytemuck::{Pod, Zeroable};

/// Per-object constants: camera matrices plus the material slot.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PerObjectConstants {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Material index replicated across all four lanes.
    pub material_index: [f32; 4],
}

/// Spotlight in the per-frame light array.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpotLight {
    /// Light-to-world transform; the light shines along row 2 from row 3.
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub energy: f32,
    pub distance: f32,
    pub quadratic_attenuation: f32,
    pub linear_attenuation: f32,
    /// Cone angle in radians.
    pub spot_size: f32,
    /// Softness of the cone edge in `[0, 1]`.
    pub spot_blend: f32,
    pub(crate) _pad: [f32; 2],
}

/// The camera flashlight as uploaded each frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FlashlightConstants {
    pub light: SpotLight,
    /// `x` is 1.0 when powered, 0.0 otherwise.
    pub power_on: [f32; 4],
}
