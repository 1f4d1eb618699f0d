use glam::{Vec2, Vec3};

use crate::config::CameraSettings;
use crate::model::Camera;

/// Movement intent for one frame, already resolved from key bindings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub super_speed: bool,
}

/// Handles camera movement and orientation
pub struct CameraController {
    /// Units per second
    pub move_speed: f32,
    /// Degrees per pixel
    pub mouse_sensitivity: f32,
    pub sprint_multiplier: f32,
    pub super_speed_multiplier: f32,
}

impl CameraController {
    pub fn new() -> Self {
        Self::from_settings(&CameraSettings::default())
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            move_speed: settings.move_speed,
            mouse_sensitivity: settings.mouse_sensitivity,
            sprint_multiplier: settings.sprint_multiplier,
            super_speed_multiplier: settings.super_speed_multiplier,
        }
    }

    /// Apply a cursor delta in screen pixels (y grows downwards) to yaw/pitch
    pub fn apply_look(&self, camera: &mut Camera, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        camera.rotate(delta.x * self.mouse_sensitivity, -delta.y * self.mouse_sensitivity);
    }

    /// Effective speed in units per second; modifiers stack multiplicatively
    pub fn speed(&self, intent: &MoveIntent) -> f32 {
        let mut speed = self.move_speed;
        if intent.sprint {
            speed *= self.sprint_multiplier;
        }
        if intent.super_speed {
            speed *= self.super_speed_multiplier;
        }
        speed
    }

    /// Free-fly along the camera's front/right axes
    pub fn update_movement(&self, camera: &mut Camera, intent: &MoveIntent, dt: f32) {
        let mut cam_move = Vec3::ZERO;
        if intent.forward {
            cam_move += camera.front();
        }
        if intent.backward {
            cam_move -= camera.front();
        }
        if intent.left {
            cam_move -= camera.right();
        }
        if intent.right {
            cam_move += camera.right();
        }

        if cam_move.length_squared() > 0.0 {
            camera.position += cam_move * self.speed(intent) * dt;
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at_origin() -> Camera {
        let mut cam = Camera::new(800, 600);
        cam.position = Vec3::ZERO;
        cam
    }

    #[test]
    fn look_moves_yaw_and_inverts_screen_y() {
        let controller = CameraController::new();
        let mut cam = camera_at_origin();
        controller.apply_look(&mut cam, Vec2::new(10.0, -20.0));
        assert!((cam.yaw() - (-89.0)).abs() < 1e-4);
        assert!((cam.pitch() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn modifiers_stack() {
        let controller = CameraController::new();
        let both = MoveIntent { sprint: true, super_speed: true, ..Default::default() };
        assert_eq!(controller.speed(&MoveIntent::default()), 5.0);
        assert_eq!(controller.speed(&both), 50.0);
    }

    #[test]
    fn forward_moves_along_front() {
        let controller = CameraController::new();
        let mut cam = camera_at_origin();
        let intent = MoveIntent { forward: true, sprint: true, ..Default::default() };
        controller.update_movement(&mut cam, &intent, 0.5);
        assert!((cam.position - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn strafe_moves_along_right() {
        let controller = CameraController::new();
        let mut cam = camera_at_origin();
        let intent = MoveIntent { left: true, ..Default::default() };
        controller.update_movement(&mut cam, &intent, 1.0);
        assert!((cam.position - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn opposite_keys_cancel() {
        let controller = CameraController::new();
        let mut cam = camera_at_origin();
        let intent = MoveIntent { forward: true, backward: true, ..Default::default() };
        controller.update_movement(&mut cam, &intent, 1.0);
        assert_eq!(cam.position, Vec3::ZERO);
    }
}
