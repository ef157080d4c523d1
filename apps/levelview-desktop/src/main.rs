use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use levelview_input::{FrameInput, MoveKeys};
use levelview_viewer::{AppConfig, Viewer};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "levelview-desktop", about = "Levelview desktop fly camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Key bindings: WASD to move, E/Q up and down, left shift to sprint,
/// F for the flashlight.
fn move_keys(held: &HashSet<KeyCode>) -> MoveKeys {
    MoveKeys {
        forward: held.contains(&KeyCode::KeyW),
        back: held.contains(&KeyCode::KeyS),
        left: held.contains(&KeyCode::KeyA),
        right: held.contains(&KeyCode::KeyD),
        up: held.contains(&KeyCode::KeyE),
        down: held.contains(&KeyCode::KeyQ),
        sprint: held.contains(&KeyCode::ShiftLeft),
        flashlight: held.contains(&KeyCode::KeyF),
    }
}

/// Input state accumulated between frames.
struct AppState {
    viewer: Viewer,
    window_size: PhysicalSize<u32>,
    keys_held: HashSet<KeyCode>,
    mouse_captured: bool,
    mouse_delta: Option<Vec2>,
    last_frame: Instant,
}

impl AppState {
    fn new(viewer: Viewer, window_size: PhysicalSize<u32>) -> Self {
        Self {
            viewer,
            window_size,
            keys_held: HashSet::new(),
            mouse_captured: false,
            mouse_delta: None,
            last_frame: Instant::now(),
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }
    }

    fn add_mouse_motion(&mut self, dx: f64, dy: f64) {
        if !self.mouse_captured {
            return;
        }
        let delta = Vec2::new(dx as f32, dy as f32);
        self.mouse_delta = Some(self.mouse_delta.unwrap_or(Vec2::ZERO) + delta);
    }

    /// Collect this frame's input and reset the per-frame mouse motion.
    fn take_frame_input(&mut self, dt_ms: f32) -> FrameInput {
        FrameInput {
            dt_ms,
            keys: move_keys(&self.keys_held),
            mouse_delta: self.mouse_delta.take(),
            // winit exposes no gamepads.
            gamepad: None,
        }
    }
}

struct DesktopApp {
    state: AppState,
    window: Option<Arc<Window>>,
}

impl DesktopApp {
    fn new(viewer: Viewer, window_size: PhysicalSize<u32>) -> Self {
        Self {
            state: AppState::new(viewer, window_size),
            window: None,
        }
    }

    fn set_mouse_capture(&mut self, captured: bool) {
        self.state.mouse_captured = captured;
        let Some(window) = &self.window else {
            return;
        };
        window.set_cursor_visible(!captured);
        let grab = if captured {
            // Some platforms only support one of the two grab modes.
            window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = grab {
            tracing::warn!("cursor grab unavailable: {e}");
        }
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("levelview")
            .with_inner_size(self.state.window_size);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.state.viewer.resize(size.width, size.height);
        self.state.last_frame = Instant::now();
        self.window = Some(window);

        tracing::info!(width = size.width, height = size.height, "window created");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.state.window_size = new_size;
                self.state.viewer.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape && key_state == ElementState::Pressed {
                    if self.state.mouse_captured {
                        self.set_mouse_capture(false);
                    } else {
                        event_loop.exit();
                    }
                    return;
                }
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.set_mouse_capture(btn_state == ElementState::Pressed);
            }
            WindowEvent::Focused(false) => {
                self.state.keys_held.clear();
                self.set_mouse_capture(false);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt_ms = ((now - self.state.last_frame).as_secs_f32() * 1000.0).min(100.0);
                self.state.last_frame = now;

                let input = self.state.take_frame_input(dt_ms);
                if let Some(frame) = self.state.viewer.frame(&input) {
                    if let Some(window) = &self.window {
                        let p = frame.view.position;
                        let f = frame.view.forward;
                        window.set_title(&format!(
                            "levelview  pos ({:.2}, {:.2}, {:.2})  dir ({:.2}, {:.2}, {:.2}){}",
                            p.x,
                            p.y,
                            p.z,
                            f.x,
                            f.y,
                            f.z,
                            if frame.flashlight.power_on[0] > 0.0 {
                                "  [flashlight]"
                            } else {
                                ""
                            }
                        ));
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.add_mouse_motion(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("levelview-desktop starting");

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let viewer = Viewer::new(&config)?;
    let size = PhysicalSize::new(config.window.width, config.window.height);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp::new(viewer, size);
    event_loop.run_app(&mut app)?;

    Ok(())
}
