use glam::{Mat4, Vec3};
use randomwalk_render::RenderView;
use std::f32::consts::TAU;

/// Camera on the +Z axis looking at the origin, with the scene turning about +Y.
///
/// The orbit is applied as the model rotation; the eye itself only moves
/// along Z when the distance changes.
pub struct OrbitCamera {
    pub distance: f32,
    pub min_distance: f32,
    pub orbit_angle: f32,
    /// Radians per second.
    pub orbit_speed: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: 10.0,
            min_distance: 1.0,
            orbit_angle: 0.0,
            orbit_speed: 0.2,
            fov: 45.0_f32.to_radians(),
            aspect: 640.0 / 480.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl OrbitCamera {
    /// Move the camera away (positive) or closer (negative), never nearer than
    /// `min_distance`.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance + amount).max(self.min_distance);
    }

    /// Advance the orbit by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.orbit_angle = (self.orbit_angle + self.orbit_speed * dt).rem_euclid(TAU);
    }

    /// Update the aspect ratio. A zero-sized viewport (minimized window) keeps
    /// the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.orbit_angle)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Renderer-agnostic description of this camera.
    pub fn render_view(&self) -> RenderView {
        RenderView {
            eye: self.eye(),
            target: Vec3::ZERO,
            fov_degrees: self.fov.to_degrees(),
            orbit_angle: self.orbit_angle,
        }
    }
}
