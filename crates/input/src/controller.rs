use levelview_camera::Camera;
use serde::{Deserialize, Serialize};

use crate::{CameraAction, FrameInput};

/// Mouse and stick deltas are scaled by this before sensitivity, in degrees
/// per unit.
const LOOK_SCALE_DEGREES: f32 = 0.1;

/// Control tunables that are not part of the camera itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Move speed multiplier while sprinting.
    pub sprint_multiplier: f32,
    /// Time the flashlight stays locked after a toggle, in milliseconds.
    pub flashlight_cooldown_ms: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            sprint_multiplier: 3.0,
            flashlight_cooldown_ms: 250.0,
        }
    }
}

/// Debounced on/off switch: a held button toggles once, then the switch is
/// locked until the cooldown has elapsed.
#[derive(Debug, Clone)]
pub struct FlashlightSwitch {
    on: bool,
    ready: bool,
    since_toggle_ms: f32,
    cooldown_ms: f32,
}

impl FlashlightSwitch {
    /// Starts switched off and ready.
    pub fn new(cooldown_ms: f32) -> Self {
        Self {
            on: false,
            ready: true,
            since_toggle_ms: 0.0,
            cooldown_ms,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Advance the cooldown by `dt_ms` and toggle if `pressed` and ready.
    /// Returns true when the switch flipped this frame.
    pub fn poll(&mut self, pressed: bool, dt_ms: f32) -> bool {
        if !self.ready {
            self.since_toggle_ms += dt_ms;
            if self.since_toggle_ms > self.cooldown_ms {
                self.ready = true;
            }
        }

        if self.ready && pressed {
            self.on = !self.on;
            self.ready = false;
            self.since_toggle_ms = 0.0;
            tracing::debug!(on = self.on, "flashlight toggled");
            return true;
        }
        false
    }
}

/// Summary of one controller update.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub actions: Vec<CameraAction>,
    pub move_speed: f32,
    pub flashlight_on: bool,
    pub flashlight_toggled: bool,
}

/// Turns per-frame input into camera movement and rotation.
#[derive(Debug, Clone)]
pub struct FlyController {
    config: ControlConfig,
    base_speed: f32,
    flashlight: FlashlightSwitch,
}

impl FlyController {
    /// `base_speed` is the un-boosted move speed the sprint multiplier
    /// scales, usually the camera's configured speed.
    pub fn new(config: ControlConfig, base_speed: f32) -> Self {
        Self {
            config,
            base_speed,
            flashlight: FlashlightSwitch::new(config.flashlight_cooldown_ms),
        }
    }

    /// Controller whose base speed is the camera's current move speed.
    pub fn for_camera(config: ControlConfig, camera: &Camera) -> Self {
        Self::new(config, camera.move_speed())
    }

    pub fn flashlight_on(&self) -> bool {
        self.flashlight.is_on()
    }

    /// Map one frame of input to camera actions without touching the camera.
    pub fn actions(&self, camera: &Camera, input: &FrameInput) -> Vec<CameraAction> {
        let pad = input.pad();
        let keys = &input.keys;
        let dt = input.dt_ms;
        let mut actions = Vec::new();

        // Speed is resolved before movement so sprint affects this frame's
        // steps rather than the next one.
        let sprinting = keys.sprint || pad.right_trigger > 0.0;
        let speed = if sprinting {
            self.base_speed * self.config.sprint_multiplier
        } else {
            self.base_speed
        };
        actions.push(CameraAction::SetMoveSpeed(speed));

        let step = speed * dt;
        let stick = pad.left_stick;

        if keys.forward {
            actions.push(CameraAction::Walk(step));
        } else if stick.y > 0.0 {
            actions.push(CameraAction::Walk(step * stick.y));
        }
        if keys.back {
            actions.push(CameraAction::Walk(-step));
        } else if stick.y < 0.0 {
            actions.push(CameraAction::Walk(step * stick.y));
        }

        if keys.left {
            actions.push(CameraAction::Strafe(-step));
        } else if stick.x < 0.0 {
            actions.push(CameraAction::Strafe(step * stick.x));
        }
        if keys.right {
            actions.push(CameraAction::Strafe(step));
        } else if stick.x > 0.0 {
            actions.push(CameraAction::Strafe(step * stick.x));
        }

        if keys.up || pad.right_shoulder {
            actions.push(CameraAction::Slide(step));
        }
        if keys.down || pad.left_shoulder {
            actions.push(CameraAction::Slide(-step));
        }

        if let Some(delta) = input.mouse_delta {
            actions.push(CameraAction::Pitch(
                (LOOK_SCALE_DEGREES * delta.y * camera.mouse_y_sensitivity()).to_radians(),
            ));
            actions.push(CameraAction::Yaw(
                (LOOK_SCALE_DEGREES * delta.x * camera.mouse_x_sensitivity()).to_radians(),
            ));
        } else {
            let look = pad.right_stick;
            if look.x != 0.0 {
                actions.push(CameraAction::Yaw(
                    (LOOK_SCALE_DEGREES * look.x * camera.stick_x_sensitivity()).to_radians(),
                ));
            }
            // Stick up looks up, which is a negative pitch.
            if look.y != 0.0 {
                actions.push(CameraAction::Pitch(
                    (-LOOK_SCALE_DEGREES * look.y * camera.stick_y_sensitivity()).to_radians(),
                ));
            }
        }

        actions
    }

    /// Apply one frame of input to the camera and rebuild its view matrix.
    pub fn update(&mut self, camera: &mut Camera, input: &FrameInput) -> FrameReport {
        let _span = tracing::trace_span!("camera_update", dt_ms = input.dt_ms).entered();

        let actions = self.actions(camera, input);
        for action in &actions {
            action.apply(camera);
        }
        camera.update_view_matrix();

        let flashlight_toggled = self.flashlight.poll(input.flashlight_pressed(), input.dt_ms);

        tracing::trace!(
            actions = actions.len(),
            x = camera.position().x,
            y = camera.position().y,
            z = camera.position().z,
            "camera updated"
        );

        FrameReport {
            actions,
            move_speed: camera.move_speed(),
            flashlight_on: self.flashlight.is_on(),
            flashlight_toggled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GamepadState, MoveKeys};
    use glam::{Mat4, Vec2, Vec3};

    const EPS: f32 = 1e-6;

    fn controller() -> (FlyController, Camera) {
        let cam = Camera::default();
        (FlyController::for_camera(ControlConfig::default(), &cam), cam)
    }

    fn with_keys(dt_ms: f32, keys: MoveKeys) -> FrameInput {
        FrameInput {
            keys,
            ..FrameInput::idle(dt_ms)
        }
    }

    fn with_pad(dt_ms: f32, pad: GamepadState) -> FrameInput {
        FrameInput {
            gamepad: Some(pad),
            ..FrameInput::idle(dt_ms)
        }
    }

    #[test]
    fn idle_frame_only_sets_base_speed() {
        let (ctl, cam) = controller();
        let actions = ctl.actions(&cam, &FrameInput::idle(16.0));
        assert_eq!(actions, vec![CameraAction::SetMoveSpeed(0.01)]);
    }

    #[test]
    fn forward_key_walks_speed_times_dt() {
        let (mut ctl, mut cam) = controller();
        let start = cam.position();
        let keys = MoveKeys {
            forward: true,
            ..MoveKeys::default()
        };
        ctl.update(&mut cam, &with_keys(100.0, keys));
        assert!(cam.position().abs_diff_eq(start + Vec3::new(0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn opposite_keys_cancel() {
        let (mut ctl, mut cam) = controller();
        let start = cam.position();
        let keys = MoveKeys {
            left: true,
            right: true,
            up: true,
            down: true,
            ..MoveKeys::default()
        };
        ctl.update(&mut cam, &with_keys(50.0, keys));
        assert!(cam.position().abs_diff_eq(start, EPS));
    }

    #[test]
    fn key_wins_over_stick_in_same_direction() {
        let (ctl, cam) = controller();
        let input = FrameInput {
            keys: MoveKeys {
                forward: true,
                ..MoveKeys::default()
            },
            gamepad: Some(GamepadState {
                left_stick: Vec2::new(0.0, 0.5),
                ..GamepadState::default()
            }),
            ..FrameInput::idle(10.0)
        };
        let walks: Vec<_> = ctl
            .actions(&cam, &input)
            .into_iter()
            .filter(|a| matches!(a, CameraAction::Walk(_)))
            .collect();
        assert_eq!(walks, vec![CameraAction::Walk(cam.move_speed() * 10.0)]);
    }

    #[test]
    fn stick_scales_step() {
        let (mut ctl, mut cam) = controller();
        let start = cam.position();
        let pad = GamepadState {
            left_stick: Vec2::new(-0.5, -0.25),
            ..GamepadState::default()
        };
        ctl.update(&mut cam, &with_pad(100.0, pad));
        // step = 0.01 * 100 = 1.0
        assert!(cam.position().abs_diff_eq(start + Vec3::new(-0.5, 0.0, -0.25), EPS));
    }

    #[test]
    fn sprint_key_and_trigger_multiply_speed() {
        let (mut ctl, mut cam) = controller();
        let sprint = MoveKeys {
            sprint: true,
            ..MoveKeys::default()
        };
        let report = ctl.update(&mut cam, &with_keys(16.0, sprint));
        assert!((report.move_speed - 0.03).abs() < EPS);

        let report = ctl.update(&mut cam, &FrameInput::idle(16.0));
        assert!((report.move_speed - 0.01).abs() < EPS);

        let trigger = GamepadState {
            right_trigger: 0.2,
            ..GamepadState::default()
        };
        let report = ctl.update(&mut cam, &with_pad(16.0, trigger));
        assert!((report.move_speed - 0.03).abs() < EPS);
    }

    #[test]
    fn sprint_applies_to_same_frame_movement() {
        let (mut ctl, mut cam) = controller();
        let start = cam.position();
        let keys = MoveKeys {
            up: true,
            sprint: true,
            ..MoveKeys::default()
        };
        ctl.update(&mut cam, &with_keys(100.0, keys));
        assert!(cam.position().abs_diff_eq(start + Vec3::new(0.0, 3.0, 0.0), EPS));
    }

    #[test]
    fn shoulders_slide_vertically() {
        let (ctl, cam) = controller();
        let pad = GamepadState {
            right_shoulder: true,
            ..GamepadState::default()
        };
        let step = cam.move_speed() * 10.0;
        let actions = ctl.actions(&cam, &with_pad(10.0, pad));
        assert!(actions.contains(&CameraAction::Slide(step)));

        let pad = GamepadState {
            left_shoulder: true,
            ..GamepadState::default()
        };
        let actions = ctl.actions(&cam, &with_pad(10.0, pad));
        assert!(actions.contains(&CameraAction::Slide(-step)));
    }

    #[test]
    fn mouse_look_uses_mouse_sensitivity() {
        let (ctl, cam) = controller();
        let input = FrameInput {
            mouse_delta: Some(Vec2::new(10.0, -5.0)),
            ..FrameInput::idle(16.0)
        };
        let actions = ctl.actions(&cam, &input);
        let pitch = (0.1_f32 * -5.0 * 0.8).to_radians();
        let yaw = (0.1_f32 * 10.0 * 0.8).to_radians();
        assert!(actions.contains(&CameraAction::Pitch(pitch)));
        assert!(actions.contains(&CameraAction::Yaw(yaw)));
    }

    #[test]
    fn mouse_motion_suppresses_right_stick() {
        let (ctl, cam) = controller();
        let input = FrameInput {
            mouse_delta: Some(Vec2::new(1.0, 0.0)),
            gamepad: Some(GamepadState {
                right_stick: Vec2::new(1.0, 1.0),
                ..GamepadState::default()
            }),
            ..FrameInput::idle(16.0)
        };
        let looks = ctl
            .actions(&cam, &input)
            .into_iter()
            .filter(|a| matches!(a, CameraAction::Pitch(_) | CameraAction::Yaw(_)))
            .count();
        // Mouse always emits a pitch and a yaw; the stick adds nothing.
        assert_eq!(looks, 2);
    }

    #[test]
    fn stick_up_pitches_up() {
        let (mut ctl, mut cam) = controller();
        let pad = GamepadState {
            right_stick: Vec2::new(0.0, 1.0),
            ..GamepadState::default()
        };
        ctl.update(&mut cam, &with_pad(16.0, pad));
        assert!(cam.forward().y > 0.0);
    }

    #[test]
    fn update_rebuilds_view_matrix() {
        let (mut ctl, mut cam) = controller();
        assert_eq!(cam.view_matrix(), Mat4::IDENTITY);
        ctl.update(&mut cam, &FrameInput::idle(16.0));
        // Default pose sits at y = 1, so the view translates by -1 in y.
        assert_eq!(cam.view_matrix_rows()[3], [0.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn flashlight_toggles_once_per_cooldown() {
        let (mut ctl, mut cam) = controller();
        let press = MoveKeys {
            flashlight: true,
            ..MoveKeys::default()
        };

        let report = ctl.update(&mut cam, &with_keys(100.0, press));
        assert!(report.flashlight_toggled);
        assert!(report.flashlight_on);

        // Still held, still inside the cooldown.
        let report = ctl.update(&mut cam, &with_keys(100.0, press));
        assert!(!report.flashlight_toggled);
        assert!(report.flashlight_on);

        // 100 + 200 ms > 250 ms: unlocked and toggled off.
        let report = ctl.update(&mut cam, &with_keys(200.0, press));
        assert!(report.flashlight_toggled);
        assert!(!report.flashlight_on);
    }

    #[test]
    fn flashlight_starts_off() {
        let (ctl, _) = controller();
        assert!(!ctl.flashlight_on());
        let mut switch = FlashlightSwitch::new(250.0);
        assert!(!switch.poll(false, 1000.0));
        assert!(!switch.is_on());
    }
}
