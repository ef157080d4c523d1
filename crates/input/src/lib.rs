//! Frame input for the fly camera: raw keyboard, mouse and gamepad state
//! mapped to shared camera actions.
//!
//! # Invariants
//! - The camera never sees raw device state, only [`CameraAction`]s.
//! - Keyboard and gamepad share one action set; keyboard wins per direction.
//! - [`FlyController::update`] rebuilds the view matrix exactly once per frame.

pub mod action;
mod controller;
mod frame;

pub use action::CameraAction;
pub use controller::{ControlConfig, FlashlightSwitch, FlyController, FrameReport};
pub use frame::{FrameInput, GamepadState, MoveKeys};
