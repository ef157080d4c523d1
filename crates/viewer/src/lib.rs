//! The viewer frame loop: input updates the camera every frame, rendering is
//! throttled to the configured frame rate.
//!
//! # Invariants
//! - The camera is updated on every [`Viewer::frame`]; a render snapshot is
//!   produced only when a full frame interval has elapsed.
//! - Resizing applies the new aspect ratio to the projection immediately;
//!   zero-sized viewports are ignored so the projection stays finite.

mod config;
mod viewer;

pub use config::AppConfig;
pub use viewer::{RenderedFrame, Viewer};
