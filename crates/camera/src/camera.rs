use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::CameraConfig;

/// The fixed global vertical axis. Yaw and slide are relative to this, never
/// to the camera's local up.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// First-person camera with an explicit right/up/forward basis.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,

    vertical_fov: f32,
    near_z: f32,
    far_z: f32,
    aspect_ratio: f32,

    move_speed: f32,
    mouse_x_sensitivity: f32,
    mouse_y_sensitivity: f32,
    stick_x_sensitivity: f32,
    stick_y_sensitivity: f32,

    view: Mat4,
    projection: Mat4,
}

impl Default for Camera {
    /// Camera one unit above the origin with a square aspect ratio.
    fn default() -> Self {
        let mut camera = Self::from_parts(&CameraConfig::default(), Vec3::new(0.0, 1.0, 0.0), 1.0);
        camera.set_cam_lens();
        camera
    }
}

impl Camera {
    /// Build a camera at the starting viewpoint with the given lens and
    /// control settings. The projection is computed immediately; the view
    /// matrix stays identity until the first [`Camera::update_view_matrix`].
    pub fn new(config: &CameraConfig, aspect_ratio: f32) -> Self {
        let mut camera = Self::from_parts(config, Vec3::new(0.0, 2.0, -0.25), aspect_ratio);
        camera.set_cam_lens();
        camera
    }

    /// [`Camera::new`] with the default [`CameraConfig`].
    pub fn with_aspect_ratio(aspect_ratio: f32) -> Self {
        Self::new(&CameraConfig::default(), aspect_ratio)
    }

    fn from_parts(config: &CameraConfig, position: Vec3, aspect_ratio: f32) -> Self {
        Self {
            position,
            right: Vec3::X,
            up: Vec3::Y,
            forward: Vec3::Z,
            vertical_fov: config.fov_degrees.to_radians(),
            near_z: config.near_z,
            far_z: config.far_z,
            aspect_ratio,
            move_speed: config.move_speed,
            mouse_x_sensitivity: config.mouse_x_sensitivity,
            mouse_y_sensitivity: config.mouse_y_sensitivity,
            stick_x_sensitivity: config.stick_x_sensitivity,
            stick_y_sensitivity: config.stick_y_sensitivity,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }

    // ── Pose ────────────────────────────────────────────────────────────────

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    // ── Tunables ────────────────────────────────────────────────────────────

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }

    pub fn mouse_x_sensitivity(&self) -> f32 {
        self.mouse_x_sensitivity
    }

    pub fn set_mouse_x_sensitivity(&mut self, value: f32) {
        self.mouse_x_sensitivity = value;
    }

    pub fn mouse_y_sensitivity(&self) -> f32 {
        self.mouse_y_sensitivity
    }

    pub fn set_mouse_y_sensitivity(&mut self, value: f32) {
        self.mouse_y_sensitivity = value;
    }

    pub fn stick_x_sensitivity(&self) -> f32 {
        self.stick_x_sensitivity
    }

    pub fn set_stick_x_sensitivity(&mut self, value: f32) {
        self.stick_x_sensitivity = value;
    }

    pub fn stick_y_sensitivity(&self) -> f32 {
        self.stick_y_sensitivity
    }

    pub fn set_stick_y_sensitivity(&mut self, value: f32) {
        self.stick_y_sensitivity = value;
    }

    // ── Movement ────────────────────────────────────────────────────────────

    /// Move along the local right axis.
    pub fn strafe(&mut self, distance: f32) {
        self.position += distance * self.right;
    }

    /// Move along the local forward axis.
    pub fn walk(&mut self, distance: f32) {
        self.position += distance * self.forward;
    }

    /// Move along world up, independent of pitch.
    pub fn slide(&mut self, distance: f32) {
        self.position += distance * WORLD_UP;
    }

    // ── Rotation ────────────────────────────────────────────────────────────

    /// Look up/down: rotate `up` and `forward` about the local right axis.
    pub fn pitch_x(&mut self, angle: f32) {
        let rotation = Mat3::from_axis_angle(self.right.normalize(), angle);
        self.up = rotation * self.up;
        self.forward = rotation * self.forward;
    }

    /// Look left/right: rotate the whole basis about world up, so pitch and
    /// yaw together never introduce roll.
    pub fn yaw_y(&mut self, angle: f32) {
        let rotation = Mat3::from_axis_angle(WORLD_UP, angle);
        self.right = rotation * self.right;
        self.up = rotation * self.up;
        self.forward = rotation * self.forward;
    }

    // ── Matrices ────────────────────────────────────────────────────────────

    /// Re-orthonormalize the basis and rebuild the view matrix.
    ///
    /// `forward` is kept as the reference direction: `up` is re-derived from
    /// it and the (possibly drifted) `right`, then `right` from the two.
    /// Call once per frame after all movement and rotation.
    pub fn update_view_matrix(&mut self) {
        let forward = self.forward.normalize();
        let up = forward.cross(self.right).normalize();
        // Already unit length: up and forward are unit and orthogonal.
        let right = up.cross(forward);

        let tx = -self.position.dot(right);
        let ty = -self.position.dot(up);
        let tz = -self.position.dot(forward);

        self.right = right;
        self.up = up;
        self.forward = forward;

        // Columns here are the rows of the row-vector view matrix.
        self.view = Mat4::from_cols(
            Vec4::new(right.x, up.x, forward.x, 0.0),
            Vec4::new(right.y, up.y, forward.y, 0.0),
            Vec4::new(right.z, up.z, forward.z, 0.0),
            Vec4::new(tx, ty, tz, 1.0),
        );
    }

    /// Recompute the left-handed perspective projection from the stored lens
    /// parameters and aspect ratio.
    pub fn set_cam_lens(&mut self) {
        self.projection =
            Mat4::perspective_lh(self.vertical_fov, self.aspect_ratio, self.near_z, self.far_z);
        tracing::trace!(
            fov = self.vertical_fov,
            aspect = self.aspect_ratio,
            near = self.near_z,
            far = self.far_z,
            "camera lens set"
        );
    }

    /// Store a new aspect ratio. The projection is left as is until the next
    /// [`Camera::set_cam_lens`].
    pub fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect_ratio = ratio;
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Vertical field of view in radians.
    pub fn vertical_fov(&self) -> f32 {
        self.vertical_fov
    }

    pub fn near_z(&self) -> f32 {
        self.near_z
    }

    pub fn far_z(&self) -> f32 {
        self.far_z
    }

    /// World-to-camera transform as of the last rebuild.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Camera-to-clip transform as of the last [`Camera::set_cam_lens`].
    pub fn perspective_matrix(&self) -> Mat4 {
        self.projection
    }

    /// View matrix as a row-major array in row-vector convention.
    pub fn view_matrix_rows(&self) -> [[f32; 4]; 4] {
        self.view.to_cols_array_2d()
    }

    /// Projection matrix as a row-major array in row-vector convention.
    pub fn perspective_matrix_rows(&self) -> [[f32; 4]; 4] {
        self.projection.to_cols_array_2d()
    }

    /// Camera-to-world transform built from the current basis and position.
    /// Used to attach lights or other objects to the camera.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_cols(
            self.right.extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            self.position.extend(1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_pose() {
        let cam = Camera::default();
        assert_eq!(cam.position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(cam.right(), Vec3::X);
        assert_eq!(cam.up(), Vec3::Y);
        assert_eq!(cam.forward(), Vec3::Z);
        assert_eq!(cam.aspect_ratio(), 1.0);
        assert_eq!(cam.view_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn aspect_pose_starts_behind_and_above() {
        let cam = Camera::with_aspect_ratio(1.5);
        assert_eq!(cam.position(), Vec3::new(0.0, 2.0, -0.25));
        assert_eq!(cam.aspect_ratio(), 1.5);
        assert_eq!(cam.view_matrix(), Mat4::IDENTITY);
        assert_ne!(cam.perspective_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn config_flows_into_tunables() {
        let config = CameraConfig {
            move_speed: 0.5,
            mouse_x_sensitivity: 1.25,
            stick_y_sensitivity: 3.0,
            ..CameraConfig::default()
        };
        let cam = Camera::new(&config, 1.0);
        assert_eq!(cam.move_speed(), 0.5);
        assert_eq!(cam.mouse_x_sensitivity(), 1.25);
        assert_eq!(cam.mouse_y_sensitivity(), 0.8);
        assert_eq!(cam.stick_y_sensitivity(), 3.0);
        assert!((cam.vertical_fov() - 65.0_f32.to_radians()).abs() < EPS);
    }

    #[test]
    fn strafe_follows_local_right() {
        let mut cam = Camera::default();
        cam.yaw_y(FRAC_PI_2);
        let start = cam.position();
        cam.strafe(2.0);
        // Yawing +90 degrees turns right from +X to -Z.
        assert!(cam.position().abs_diff_eq(start + Vec3::new(0.0, 0.0, -2.0), EPS));
    }

    #[test]
    fn pitch_leaves_right_untouched() {
        let mut cam = Camera::default();
        cam.pitch_x(0.3);
        assert_eq!(cam.right(), Vec3::X);
        assert!((cam.forward().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn positive_pitch_looks_down() {
        let mut cam = Camera::default();
        cam.pitch_x(FRAC_PI_2);
        assert!(cam.forward().abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn rebuild_repairs_drifted_basis() {
        let mut cam = Camera::default();
        cam.forward = Vec3::new(0.1, 0.05, 2.0);
        cam.right = Vec3::new(1.1, 0.02, 0.0);
        cam.update_view_matrix();
        let (r, u, f) = (cam.right(), cam.up(), cam.forward());
        assert!((r.length() - 1.0).abs() < EPS);
        assert!((u.length() - 1.0).abs() < EPS);
        assert!((f.length() - 1.0).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
        assert!(u.dot(f).abs() < EPS);
        assert!(f.dot(r).abs() < EPS);
    }

    #[test]
    fn view_rows_put_translation_last() {
        let mut cam = Camera::default();
        cam.set_position(Vec3::new(1.0, 2.0, 3.0));
        cam.update_view_matrix();
        let rows = cam.view_matrix_rows();
        assert_eq!(rows[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(rows[1], [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(rows[2], [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(rows[3], [-1.0, -2.0, -3.0, 1.0]);
    }

    #[test]
    fn projection_is_left_handed() {
        let cam = Camera::default();
        let rows = cam.perspective_matrix_rows();
        // Row-vector LH perspective: +1 in [2][3], -near*far/(far-near) in [3][2].
        assert_eq!(rows[2][3], 1.0);
        let q = cam.far_z() / (cam.far_z() - cam.near_z());
        assert!((rows[2][2] - q).abs() < EPS);
        assert!((rows[3][2] + q * cam.near_z()).abs() < EPS);
        let y_scale = 1.0 / (cam.vertical_fov() / 2.0).tan();
        assert!((rows[1][1] - y_scale).abs() < EPS);
        assert!((rows[0][0] - y_scale).abs() < EPS);
    }

    #[test]
    fn world_matrix_inverts_view() {
        let mut cam = Camera::with_aspect_ratio(1.5);
        cam.yaw_y(0.7);
        cam.pitch_x(-0.4);
        cam.walk(3.0);
        cam.update_view_matrix();
        let round_trip = cam.world_matrix() * cam.view_matrix();
        assert!(round_trip.abs_diff_eq(Mat4::IDENTITY, EPS));
        let p = cam.world_matrix().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(cam.position(), EPS));
    }
}
