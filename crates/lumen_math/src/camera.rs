use glam::{Mat4, Vec3};

/// Pitch is kept just short of straight up/down so the basis never degenerates.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Yaw/pitch camera shared by the rasterizer and the ray tracer.
///
/// Left-handed: +Z forward, +Y up. The view and projection matrices are
/// cached and only rebuilt by [`Camera::calculate_view_matrix`] and
/// [`Camera::calculate_projection_matrix`]; changing a field does not
/// touch them.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub origin: Vec3,
    /// Vertical field of view in degrees.
    pub fov_angle: f32,
    /// `tan(fov_angle / 2)`, used for primary ray generation.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    /// Accumulated yaw in radians (rotation about +Y).
    pub total_yaw: f32,
    /// Accumulated pitch in radians (rotation about +X).
    pub total_pitch: f32,

    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,

    pub view_matrix: Mat4,
    pub inv_view_matrix: Mat4,
    pub projection_matrix: Mat4,
}

impl Camera {
    /// Create a camera looking down +Z with both matrices computed.
    pub fn new(origin: Vec3, fov_degrees: f32, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            origin,
            fov_angle: fov_degrees,
            fov: (fov_degrees.to_radians() * 0.5).tan(),
            aspect_ratio,
            near: 0.1,
            far: 100.0,
            total_yaw: 0.0,
            total_pitch: 0.0,
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
            view_matrix: Mat4::IDENTITY,
            inv_view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.calculate_view_matrix();
        camera.calculate_projection_matrix();
        camera
    }

    /// Change the field of view. Only `fov` is refreshed; call
    /// [`Camera::calculate_projection_matrix`] to rebuild the projection.
    pub fn set_fov(&mut self, fov_degrees: f32) {
        self.fov_angle = fov_degrees;
        self.fov = (fov_degrees.to_radians() * 0.5).tan();
    }

    /// Rebuild the basis from yaw/pitch and cache the world-to-camera matrix
    /// and its inverse.
    pub fn calculate_view_matrix(&mut self) {
        let rotation = Mat4::from_rotation_y(self.total_yaw) * Mat4::from_rotation_x(self.total_pitch);
        self.forward = rotation.transform_vector3(Vec3::Z).normalize();
        self.right = Vec3::Y.cross(self.forward).normalize();
        self.up = self.forward.cross(self.right).normalize();

        self.view_matrix = Mat4::look_to_lh(self.origin, self.forward, Vec3::Y);
        self.inv_view_matrix = self.view_matrix.inverse();
    }

    /// Cache the perspective projection (camera space to clip space,
    /// depth mapped to `[0, 1]`).
    pub fn calculate_projection_matrix(&mut self) {
        self.projection_matrix =
            Mat4::perspective_lh(self.fov_angle.to_radians(), self.aspect_ratio, self.near, self.far);
    }

    /// `projection * view` from the cached matrices.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Camera-to-world transform used to orient primary rays.
    pub fn camera_to_world(&self) -> Mat4 {
        self.inv_view_matrix
    }

    /// Accumulate a yaw/pitch change in radians. Pitch is clamped.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.total_yaw += yaw_delta;
        self.total_pitch = (self.total_pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move in the current basis: `delta.x` along right, `delta.y` along up,
    /// `delta.z` along forward.
    pub fn translate_local(&mut self, delta: Vec3) {
        self.origin += self.right * delta.x + self.up * delta.y + self.forward * delta.z;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 45.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(Vec3::new(0.0, 1.0, -5.0), 90.0, 16.0 / 9.0);

        assert_eq!(camera.origin, Vec3::new(0.0, 1.0, -5.0));
        assert!((camera.fov - 1.0).abs() < 1e-5);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
        assert!(approx(camera.forward, Vec3::Z));
    }

    #[test]
    fn test_view_matrix_moves_origin_to_zero() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, -5.0), 45.0, 1.0);
        let p = camera.view_matrix.transform_point3(camera.origin);
        assert!(approx(p, Vec3::ZERO));

        // A point in front of the camera lands on +Z in camera space
        let ahead = camera.view_matrix.transform_point3(Vec3::new(1.0, 2.0, 0.0));
        assert!(approx(ahead, Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_camera_to_world_inverts_view() {
        let mut camera = Camera::new(Vec3::new(3.0, 0.0, 0.0), 60.0, 1.0);
        camera.rotate(0.4, -0.2);
        camera.calculate_view_matrix();

        let product = camera.camera_to_world() * camera.view_matrix;
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4));
        assert!(approx(camera.camera_to_world().transform_vector3(Vec3::Z), camera.forward));
    }

    #[test]
    fn test_yaw_turns_forward_towards_x() {
        let mut camera = Camera::default();
        camera.rotate(std::f32::consts::FRAC_PI_2, 0.0);
        camera.calculate_view_matrix();

        assert!(approx(camera.forward, Vec3::X));
        assert!(approx(camera.right, -Vec3::Z));
        assert!(approx(camera.up, Vec3::Y));
    }

    #[test]
    fn test_matrices_stale_until_recalculated() {
        let mut camera = Camera::default();
        let view = camera.view_matrix;
        let projection = camera.projection_matrix;

        camera.origin = Vec3::new(0.0, 0.0, -10.0);
        camera.rotate(0.5, 0.0);
        camera.set_fov(90.0);
        assert_eq!(camera.view_matrix, view);
        assert_eq!(camera.projection_matrix, projection);

        camera.calculate_view_matrix();
        camera.calculate_projection_matrix();
        assert_ne!(camera.view_matrix, view);
        assert_ne!(camera.projection_matrix, projection);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 10.0);
        assert!(camera.total_pitch < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_translate_local_follows_basis() {
        let mut camera = Camera::default();
        camera.rotate(std::f32::consts::FRAC_PI_2, 0.0);
        camera.calculate_view_matrix();
        camera.translate_local(Vec3::new(0.0, 0.0, 2.0));
        assert!(approx(camera.origin, Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = Camera::default();
        let near = camera.projection_matrix.project_point3(Vec3::new(0.0, 0.0, camera.near));
        let far = camera.projection_matrix.project_point3(Vec3::new(0.0, 0.0, camera.far));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }
}
