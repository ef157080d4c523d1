use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movement and utility keys held during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub sprint: bool,
    pub flashlight: bool,
}

/// Gamepad state sampled once per frame. Axes are in `[-1, 1]`, with
/// positive Y meaning stick pushed forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadState {
    pub left_stick: Vec2,
    pub right_stick: Vec2,
    pub left_shoulder: bool,
    pub right_shoulder: bool,
    /// Analog right trigger in `[0, 1]`.
    pub right_trigger: f32,
    /// Bottom face button (A / Cross).
    pub south: bool,
}

/// Everything the fly controller reads for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    /// Elapsed time since the previous frame, in milliseconds.
    pub dt_ms: f32,
    pub keys: MoveKeys,
    /// Mouse motion in pixels; `None` when the mouse did not move.
    pub mouse_delta: Option<Vec2>,
    /// `None` when no gamepad is connected.
    pub gamepad: Option<GamepadState>,
}

impl FrameInput {
    pub fn idle(dt_ms: f32) -> Self {
        Self {
            dt_ms,
            ..Self::default()
        }
    }

    /// Gamepad state, or all-neutral when disconnected.
    pub fn pad(&self) -> GamepadState {
        self.gamepad.unwrap_or_default()
    }

    pub fn flashlight_pressed(&self) -> bool {
        self.keys.flashlight || self.gamepad.is_some_and(|g| g.south)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnected_pad_is_neutral() {
        let input = FrameInput::idle(16.0);
        assert_eq!(input.pad(), GamepadState::default());
        assert!(!input.flashlight_pressed());
    }

    #[test]
    fn south_button_presses_flashlight() {
        let input = FrameInput {
            gamepad: Some(GamepadState {
                south: true,
                ..GamepadState::default()
            }),
            ..FrameInput::idle(16.0)
        };
        assert!(input.flashlight_pressed());
    }

    #[test]
    fn frame_from_yaml() {
        let yaml = "dt_ms: 33.0\nkeys:\n  forward: true\nmouse_delta: [4.0, -2.0]\n";
        let input: FrameInput = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(input.dt_ms, 33.0);
        assert!(input.keys.forward);
        assert!(!input.keys.back);
        assert_eq!(input.mouse_delta, Some(Vec2::new(4.0, -2.0)));
        assert!(input.gamepad.is_none());
    }
}
