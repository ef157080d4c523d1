use std::fmt::Write as _;

use glam::Vec3;
use levelview_camera::Camera;

use crate::PerObjectConstants;

/// Camera state captured for one frame of rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Row-major view matrix, row-vector convention.
    pub view: [[f32; 4]; 4],
    /// Row-major projection matrix, row-vector convention.
    pub projection: [[f32; 4]; 4],
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    pub aspect_ratio: f32,
}

impl RenderView {
    /// Snapshot the camera. Call after the frame's view rebuild.
    pub fn capture(camera: &Camera) -> Self {
        Self {
            view: camera.view_matrix_rows(),
            projection: camera.perspective_matrix_rows(),
            position: camera.position(),
            right: camera.right(),
            up: camera.up(),
            forward: camera.forward(),
            aspect_ratio: camera.aspect_ratio(),
        }
    }

    /// Per-object constant-buffer contents for a draw using `material_index`.
    pub fn per_object(&self, material_index: u32) -> PerObjectConstants {
        PerObjectConstants {
            view: self.view,
            projection: self.projection,
            material_index: [material_index as f32; 4],
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a captured view and produces output. It never touches
/// the camera that produced the view.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given view.
    fn render(&self, view: &RenderView) -> Self::Output;
}

/// Text renderer that describes the frame instead of drawing it.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also print both matrices row by row.
    pub show_matrices: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matrices() -> Self {
        Self {
            show_matrices: true,
        }
    }
}

fn push_vec(out: &mut String, label: &str, v: Vec3) {
    let _ = writeln!(out, "{label:<9}({:.3}, {:.3}, {:.3})", v.x, v.y, v.z);
}

fn push_matrix(out: &mut String, label: &str, m: &[[f32; 4]; 4]) {
    let _ = writeln!(out, "{label}:");
    for row in m {
        let _ = writeln!(
            out,
            "  [{:>10.4} {:>10.4} {:>10.4} {:>10.4}]",
            row[0], row[1], row[2], row[3]
        );
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Camera (aspect={:.3}) ===", view.aspect_ratio);
        push_vec(&mut out, "position", view.position);
        push_vec(&mut out, "right", view.right);
        push_vec(&mut out, "up", view.up);
        push_vec(&mut out, "forward", view.forward);

        if self.show_matrices {
            push_matrix(&mut out, "view", &view.view);
            push_matrix(&mut out, "projection", &view.projection);
        }

        out
    }
}
