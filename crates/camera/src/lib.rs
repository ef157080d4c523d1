//! First-person fly camera.
//!
//! The camera stores its orientation as an explicit right/up/forward basis
//! instead of yaw/pitch angles. Rotations mutate the basis directly and the
//! basis is re-orthonormalized once per frame when the view matrix is rebuilt.
//!
//! # Conventions
//! - Left-handed: `forward` starts at `+Z`, `right` at `+X`, `up` at `+Y`.
//! - Matrices are stored as [`glam::Mat4`] such that
//!   `view.transform_point3(world)` yields camera space. The `*_rows()`
//!   accessors return the same data as row-major arrays for the row-vector
//!   convention (`p' = p * M`), translation in the last row.
//!
//! # Invariants
//! - Right/up/forward are orthonormal immediately after
//!   [`Camera::update_view_matrix`]. Between rotations and the next rebuild
//!   they may drift.
//! - [`Camera::set_aspect_ratio`] never touches the projection; call
//!   [`Camera::set_cam_lens`] to apply it.

mod camera;
mod config;

pub use camera::{Camera, WORLD_UP};
pub use config::CameraConfig;
