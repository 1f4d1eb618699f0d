use glam::{Mat4, Vec3};

use crate::config::CameraSettings;

/// Pitch limit in degrees, keeps the view from flipping over the poles
pub const PITCH_LIMIT: f32 = 89.0;

/// Free-fly perspective camera. Yaw and pitch are stored in degrees;
/// `front`, `right` and `up` are recomputed whenever either changes.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    pub world_up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_settings(&CameraSettings::default(), width, height)
    }

    pub fn from_settings(settings: &CameraSettings, width: u32, height: u32) -> Self {
        let mut cam = Self {
            position: Vec3::from_array(settings.start_position),
            yaw: settings.start_yaw,
            pitch: 0.0,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up: Vec3::Y,
            fov_y: settings.fov_y_degrees.to_radians(),
            aspect: 1.0,
            z_near: settings.z_near,
            z_far: settings.z_far,
        };
        cam.set_aspect(width, height);
        cam.set_orientation(settings.start_yaw, settings.start_pitch);
        cam
    }

    pub fn yaw(&self) -> f32 { self.yaw }

    pub fn pitch(&self) -> f32 { self.pitch }

    pub fn front(&self) -> Vec3 { self.front }

    pub fn right(&self) -> Vec3 { self.right }

    pub fn up(&self) -> Vec3 { self.up }

    /// Sets yaw/pitch (degrees), clamping pitch to +/- PITCH_LIMIT
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.set_orientation(self.yaw + delta_yaw, self.pitch + delta_pitch);
    }

    pub fn set_look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        let yaw = dir.z.atan2(dir.x).to_degrees();
        let pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
        self.set_orientation(yaw, pitch);
    }

    /// Zero-sized viewports keep the previous aspect ratio
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    pub fn target(&self) -> Vec3 { self.position + self.front }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target(), self.world_up)
    }

    /// OpenGL-style projection, clip-space depth in [-1, 1]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
