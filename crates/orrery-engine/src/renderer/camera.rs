use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};
use crate::systems::picking::Ray;

/// Perspective camera for 3D rendering.
///
/// Right-handed, Y up, looking down its local -Z. The projection matrix is
/// cached and only rebuilt by `update_projection` (or `set_aspect`), so a
/// caller that mutates `fov_y`/`near`/`far` directly must refresh it.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Eye position in world space.
    pub position: Vec3,
    pub up: Vec3,
    /// Unit view direction.
    forward: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov_y,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            up: Vec3::Y,
            forward: Vec3::NEG_Z,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection();
        cam
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Recompute the cached projection from fov/aspect/near/far.
    pub fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far);
    }

    /// Set the aspect ratio and refresh the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    /// Point the camera at a world-space target. Ignored if the target
    /// coincides with the eye.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(dir) = (target - self.position).try_normalize() {
            self.forward = dir;
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Ray from the eye through a point in normalized device coordinates
    /// (`x`, `y` in [-1, 1], +y up).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let inv = self.view_projection().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        if far.w.abs() < f32::EPSILON {
            return None;
        }
        let far = far.xyz() / far.w;
        Ray::new(self.position, far - self.position)
    }

    /// Project a world point to NDC. `None` when the point is behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.xy() / clip.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 2000.0)
            .with_position(Vec3::new(0.0, 40.0, 120.0));
        cam.look_at(Vec3::ZERO);
        cam
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::ZERO).unwrap();
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((ray.dir - expected).length() < 1e-4, "got {:?}", ray.dir);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn project_inverts_ray() {
        let cam = camera();
        let ndc = Vec2::new(0.4, -0.25);
        let ray = cam.ray_from_ndc(ndc).unwrap();
        let back = cam.project(ray.at(50.0)).unwrap();
        assert!((back - ndc).length() < 1e-3, "got {:?}", back);
    }

    #[test]
    fn set_aspect_rebuilds_projection() {
        let mut cam = camera();
        let before = cam.projection_matrix();
        cam.set_aspect(4.0 / 3.0);
        assert_ne!(before, cam.projection_matrix());
        // x scale is f / aspect
        let f = 1.0 / (75f32.to_radians() / 2.0).tan();
        assert!((cam.projection_matrix().x_axis.x - f * 0.75).abs() < 1e-4);
    }

    #[test]
    fn point_behind_eye_does_not_project() {
        let cam = camera();
        assert!(cam.project(Vec3::new(0.0, 80.0, 240.0)).is_none());
    }

    #[test]
    fn look_at_eye_keeps_previous_direction() {
        let mut cam = camera();
        let before = cam.forward();
        cam.look_at(cam.position);
        assert_eq!(cam.forward(), before);
    }
}
