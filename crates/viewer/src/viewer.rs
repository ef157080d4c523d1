use levelview_camera::Camera;
use levelview_common::{ConfigError, FrameTiming, WindowConfig};
use levelview_input::{FlyController, FrameInput};
use levelview_render::{Flashlight, FlashlightConstants, PerObjectConstants, RenderView};

use crate::AppConfig;

/// Everything the draw step uploads for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedFrame {
    /// Sequence number of this rendered frame, starting at 0.
    pub index: u64,
    pub view: RenderView,
    pub per_object: PerObjectConstants,
    pub flashlight: FlashlightConstants,
}

/// Owns the camera and drives it from frame input.
pub struct Viewer {
    camera: Camera,
    controller: FlyController,
    flashlight: Flashlight,
    timing: FrameTiming,
    since_render_ms: f64,
    frames_rendered: u64,
}

impl Viewer {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let camera = Camera::new(&config.camera, config.window.aspect_ratio());
        let controller = FlyController::for_camera(config.controls, &camera);
        tracing::info!(
            width = config.window.width,
            height = config.window.height,
            fps = config.timing.target_fps,
            "viewer created"
        );
        Ok(Self {
            camera,
            controller,
            flashlight: Flashlight::new(&config.flashlight),
            timing: config.timing,
            since_render_ms: 0.0,
            frames_rendered: 0,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn flashlight(&self) -> &Flashlight {
        &self.flashlight
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Apply a new window size: store the aspect ratio, then rebuild the lens.
    /// A zero-sized (minimized) window keeps the current projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "ignoring zero-sized viewport");
            return;
        }
        let aspect = WindowConfig { width, height }.aspect_ratio();
        self.camera.set_aspect_ratio(aspect);
        self.camera.set_cam_lens();
        tracing::debug!(width, height, aspect, "viewport resized");
    }

    /// Update the camera from one frame of input. Returns a render snapshot
    /// when at least one frame interval has passed since the last one.
    pub fn frame(&mut self, input: &FrameInput) -> Option<RenderedFrame> {
        let report = self.controller.update(&mut self.camera, input);
        self.flashlight.set_power(report.flashlight_on);

        self.since_render_ms += f64::from(input.dt_ms);
        if self.since_render_ms < self.timing.frame_time_ms() {
            return None;
        }
        self.since_render_ms = 0.0;
        Some(self.render_now())
    }

    /// Produce a render snapshot from the current camera state regardless
    /// of frame pacing.
    pub fn render_now(&mut self) -> RenderedFrame {
        self.flashlight.follow(&self.camera);
        let view = RenderView::capture(&self.camera);
        let frame = RenderedFrame {
            index: self.frames_rendered,
            view,
            per_object: view.per_object(0),
            flashlight: self.flashlight.constants(),
        };
        self.frames_rendered += 1;
        tracing::trace!(index = frame.index, "frame rendered");
        frame
    }
}
