//! Shared types for the levelview workspace: window and frame-timing
//! configuration plus the YAML loading helpers every config section uses.
//!
//! # Invariants
//! - Config structs are plain data with `Default` impls; no process-wide state.
//! - Loading is the only fallible path; everything downstream takes values.

mod config;
mod types;

pub use config::{load_yaml, parse_yaml, to_yaml, ConfigError};
pub use types::{FrameTiming, WindowConfig};
