//! Render boundary for the fly camera.
//!
//! Everything the draw step needs from the camera each frame: a
//! [`RenderView`] snapshot, GPU constant-buffer layouts, and the spotlight
//! attached to the camera.
//!
//! # Invariants
//! - Renderers read camera state; they never mutate the camera.
//! - Capture a [`RenderView`] only after the frame's view rebuild.
//! - Constant-buffer structs are `#[repr(C)]`, `Pod`, and sized to a
//!   multiple of 16 bytes.

mod constants;
mod flashlight;
mod renderer;

pub use constants::{FlashlightConstants, PerObjectConstants, SpotLight};
pub use flashlight::{Flashlight, FlashlightConfig};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "levelview-render v0.1.0"
}
