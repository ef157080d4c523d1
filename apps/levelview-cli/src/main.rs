use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use levelview_camera::Camera;
use levelview_input::FrameInput;
use levelview_render::{DebugTextRenderer, RenderView, Renderer};
use levelview_viewer::{AppConfig, Viewer};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "levelview-cli", about = "CLI tool for levelview camera operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the effective configuration as YAML
    Config,
    /// Print camera matrices for a pose
    Matrices {
        /// Camera position
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        position: Option<Vec<f32>>,
        /// Yaw about world up, in degrees
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        yaw: f32,
        /// Pitch about the camera's right axis, in degrees
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        pitch: f32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replay a YAML input script through the fly controller
    Simulate {
        /// Script file with a `frames` list
        script: PathBuf,
        /// Number of times to play the script
        #[arg(short, long, default_value = "1")]
        repeat: u32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Recorded frame inputs, played back in order.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InputScript {
    frames: Vec<FrameInput>,
}

/// Machine-readable camera state.
#[derive(Debug, Serialize)]
struct CameraSummary {
    position: [f32; 3],
    right: [f32; 3],
    up: [f32; 3],
    forward: [f32; 3],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl CameraSummary {
    fn from_view(view: &RenderView) -> Self {
        Self {
            position: view.position.to_array(),
            right: view.right.to_array(),
            up: view.up.to_array(),
            forward: view.forward.to_array(),
            view: view.view,
            projection: view.projection,
        }
    }
}

#[derive(Debug, Serialize)]
struct SimulationSummary {
    frames_played: u64,
    frames_rendered: u64,
    flashlight_on: bool,
    camera: CameraSummary,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("levelview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", levelview_render::crate_info());
            println!(
                "window: {}x{} (aspect {:.3}), target {} fps",
                config.window.width,
                config.window.height,
                config.window.aspect_ratio(),
                config.timing.target_fps
            );
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
        Commands::Matrices {
            position,
            yaw,
            pitch,
            json,
        } => {
            let mut camera = Camera::new(&config.camera, config.window.aspect_ratio());
            if let Some(p) = position {
                camera.set_position(Vec3::new(p[0], p[1], p[2]));
            }
            camera.yaw_y(yaw.to_radians());
            camera.pitch_x(pitch.to_radians());
            camera.update_view_matrix();

            let view = RenderView::capture(&camera);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&CameraSummary::from_view(&view))?
                );
            } else {
                print!("{}", DebugTextRenderer::with_matrices().render(&view));
            }
        }
        Commands::Simulate {
            script,
            repeat,
            json,
        } => {
            let input: InputScript = levelview_common::load_yaml(&script)
                .with_context(|| format!("failed to load script {}", script.display()))?;
            if input.frames.is_empty() {
                anyhow::bail!("script {} has no frames", script.display());
            }
            tracing::info!(
                frames = input.frames.len(),
                repeat,
                "replaying input script"
            );

            let mut viewer = Viewer::new(&config)?;
            let mut played = 0_u64;
            for _ in 0..repeat {
                for frame in &input.frames {
                    if let Some(rendered) = viewer.frame(frame) {
                        tracing::debug!(index = rendered.index, "rendered");
                    }
                    played += 1;
                }
            }

            let view = RenderView::capture(viewer.camera());
            if json {
                let summary = SimulationSummary {
                    frames_played: played,
                    frames_rendered: viewer.frames_rendered(),
                    flashlight_on: viewer.flashlight().is_on(),
                    camera: CameraSummary::from_view(&view),
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "Played {played} frames, rendered {}, flashlight {}",
                    viewer.frames_rendered(),
                    if viewer.flashlight().is_on() { "on" } else { "off" }
                );
                print!("{}", DebugTextRenderer::with_matrices().render(&view));
            }
        }
    }

    Ok(())
}
