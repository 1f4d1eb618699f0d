use glam::{Vec2, Vec3};

use crate::config::InteractionSettings;
use crate::controller::picking::{self, Ray};
use crate::model::{Camera, ObjectKey, Scene};

/// Hand tool lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandState {
    Idle,
    Holding { key: ObjectKey },
    /// Held and being spun by cursor motion; `last_cursor` is the reference
    /// the next frame's delta is measured from.
    Rotating { key: ObjectKey, last_cursor: Vec2 },
}

/// Pick up, carry, spin and throw objects.
///
/// While an object is held it is kinematic, so the physics step keeps its
/// velocities at zero. The spin driven by the cursor is kept here and
/// integrated into the object's rotation every frame; on release it becomes
/// the object's angular velocity so the throw keeps spinning.
#[derive(Debug, Clone)]
pub struct HandTool {
    state: HandState,
    hold_distance: f32,
    spin: Vec3,
    settings: InteractionSettings,
}

impl HandTool {
    pub fn new(settings: InteractionSettings) -> Self {
        let hold_distance = clamp_hold(&settings, settings.initial_hold_distance);
        Self {
            state: HandState::Idle,
            hold_distance,
            spin: Vec3::ZERO,
            settings,
        }
    }

    pub fn state(&self) -> HandState {
        self.state
    }

    pub fn held(&self) -> Option<ObjectKey> {
        match self.state {
            HandState::Idle => None,
            HandState::Holding { key } | HandState::Rotating { key, .. } => Some(key),
        }
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.state, HandState::Rotating { .. })
    }

    pub fn hold_distance(&self) -> f32 {
        self.hold_distance
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    /// Idle -> Holding if the ray hits something within pickup range
    pub fn try_pick(&mut self, scene: &mut Scene, ray: &Ray) -> Option<ObjectKey> {
        if self.state != HandState::Idle {
            return None;
        }
        let hit = picking::pick(scene, ray, self.settings.pickup_range, None)?;
        self.grab(scene, hit.key);
        Some(hit.key)
    }

    /// Hold `key` directly, dropping whatever was held before.
    pub fn grab(&mut self, scene: &mut Scene, key: ObjectKey) {
        if self.held() == Some(key) {
            return;
        }
        if let Some(previous) = self.held() {
            self.drop_held(scene, previous);
        }

        let Some(obj) = scene.get_mut(key) else {
            return;
        };
        obj.is_kinematic = true;
        obj.stop();
        tracing::info!("Picked up object: {}", obj.id);

        self.spin = Vec3::ZERO;
        self.state = HandState::Holding { key };
    }

    /// Holding -> Rotating; the cursor becomes the delta reference
    pub fn begin_rotate(&mut self, cursor: Vec2) {
        if let HandState::Holding { key } = self.state {
            self.spin = Vec3::ZERO;
            self.state = HandState::Rotating { key, last_cursor: cursor };
        }
    }

    /// Rotating -> Holding
    pub fn end_rotate(&mut self) {
        if let HandState::Rotating { key, .. } = self.state {
            self.spin = Vec3::ZERO;
            self.state = HandState::Holding { key };
        }
    }

    /// Turn cursor motion since the last update into spin (rad/s). Screen y is
    /// flipped so dragging up pitches the object up. A still cursor keeps the
    /// previous spin.
    pub fn update_rotation(&mut self, cursor: Vec2) {
        if let HandState::Rotating { key, last_cursor } = self.state {
            let delta = cursor - last_cursor;
            if delta != Vec2::ZERO {
                let k = self.settings.rotate_sensitivity;
                self.spin = Vec3::new(-delta.y * k, delta.x * k, 0.0);
            }
            self.state = HandState::Rotating { key, last_cursor: cursor };
        }
    }

    /// Current cursor-driven spin of the held object
    pub fn spin(&self) -> Vec3 {
        self.spin
    }

    /// Scroll forward pulls the object closer. Ignored while idle.
    pub fn adjust_hold_distance(&mut self, scroll_delta: f32) {
        if self.held().is_none() || scroll_delta == 0.0 {
            return;
        }
        self.hold_distance = clamp_hold(&self.settings, self.hold_distance - scroll_delta * self.settings.scroll_sensitivity);
    }

    /// Pin the held object in front of the camera and apply the spin.
    /// Runs before the physics step so the rendered pose is never stale.
    pub fn update_held_pose(&mut self, scene: &mut Scene, camera: &Camera, dt: f32) {
        let Some(key) = self.held() else {
            return;
        };
        let Some(obj) = scene.get_mut(key) else {
            self.state = HandState::Idle;
            return;
        };
        obj.is_kinematic = true;
        obj.position = camera.position + camera.front() * self.hold_distance;
        if self.is_rotating() {
            obj.rotation += self.spin * dt;
        }
    }

    /// Holding/Rotating -> Idle, throwing the object along `throw_direction`.
    /// Returns the released key.
    pub fn release(&mut self, scene: &mut Scene, throw_direction: Vec3) -> Option<ObjectKey> {
        let key = self.held()?;
        let rotating = self.is_rotating();

        if let Some(obj) = scene.get_mut(key) {
            obj.is_kinematic = false;
            obj.velocity = throw_direction.normalize_or_zero() * self.settings.throw_force;
            obj.angular_velocity = if rotating { self.spin } else { Vec3::ZERO };
            tracing::info!("Released object: {}", obj.id);
        }

        self.spin = Vec3::ZERO;
        self.state = HandState::Idle;
        Some(key)
    }

    /// Let go without throwing, used when another object takes its place
    fn drop_held(&mut self, scene: &mut Scene, key: ObjectKey) {
        if let Some(obj) = scene.get_mut(key) {
            obj.is_kinematic = false;
            obj.stop();
            tracing::info!("Dropped object: {}", obj.id);
        }
        self.spin = Vec3::ZERO;
        self.state = HandState::Idle;
    }
}

/// Unlike `f32::clamp` this never panics; an inverted range pins to the max.
fn clamp_hold(settings: &InteractionSettings, distance: f32) -> f32 {
    distance.max(settings.min_hold_distance).min(settings.max_hold_distance)
}
