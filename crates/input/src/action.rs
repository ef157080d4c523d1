use levelview_camera::Camera;

/// A camera operation produced from one frame of input.
///
/// Distances are in world units and angles in radians, already scaled by
/// speed, sensitivity and frame time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAction {
    /// Replace the camera's current move speed.
    SetMoveSpeed(f32),
    /// Move along local forward.
    Walk(f32),
    /// Move along local right.
    Strafe(f32),
    /// Move along world up.
    Slide(f32),
    /// Rotate about local right.
    Pitch(f32),
    /// Rotate about world up.
    Yaw(f32),
}

impl CameraAction {
    pub fn apply(self, camera: &mut Camera) {
        match self {
            Self::SetMoveSpeed(speed) => camera.set_move_speed(speed),
            Self::Walk(d) => camera.walk(d),
            Self::Strafe(d) => camera.strafe(d),
            Self::Slide(d) => camera.slide(d),
            Self::Pitch(a) => camera.pitch_x(a),
            Self::Yaw(a) => camera.yaw_y(a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn movement_actions_move_the_camera() {
        let mut cam = Camera::default();
        let start = cam.position();
        CameraAction::Walk(2.0).apply(&mut cam);
        CameraAction::Strafe(1.0).apply(&mut cam);
        CameraAction::Slide(-0.5).apply(&mut cam);
        assert_eq!(cam.position(), start + Vec3::new(1.0, -0.5, 2.0));
    }

    #[test]
    fn set_move_speed_replaces_speed() {
        let mut cam = Camera::default();
        CameraAction::SetMoveSpeed(0.03).apply(&mut cam);
        assert_eq!(cam.move_speed(), 0.03);
    }

    #[test]
    fn yaw_action_turns_forward() {
        let mut cam = Camera::default();
        CameraAction::Yaw(std::f32::consts::PI).apply(&mut cam);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }
}
