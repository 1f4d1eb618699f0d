use crate::config::PhysicsSettings;
use crate::model::Scene;

/// Gravity + ground plane integrator for every object in a scene
pub struct PhysicsSystem {
    pub gravity: f32,
    pub ground_y: f32,
    pub ground_damping: f32,
}

impl PhysicsSystem {
    pub fn new() -> Self {
        Self::from_settings(&PhysicsSettings::default())
    }

    pub fn from_settings(settings: &PhysicsSettings) -> Self {
        Self {
            gravity: settings.gravity,
            ground_y: settings.ground_y,
            ground_damping: settings.ground_damping,
        }
    }

    /// Advance every dynamic object by exactly `dt` seconds (semi-implicit Euler).
    /// Kinematic objects only get their velocities cleared.
    pub fn step(&self, scene: &mut Scene, dt: f32) {
        for obj in scene.objects_mut() {
            if obj.is_kinematic {
                obj.stop();
                continue;
            }

            obj.velocity.y += self.gravity * dt;
            obj.position += obj.velocity * dt;
            obj.rotation += obj.angular_velocity * dt;

            // Ground contact against the unrotated bounds
            if obj.lowest_point_y() < self.ground_y {
                obj.position.y = self.ground_y - obj.scale.y * obj.bounds.min.y;
                obj.velocity.y = 0.0;
                obj.is_grounded = true;
                obj.velocity.x *= self.ground_damping;
                obj.velocity.z *= self.ground_damping;
                obj.angular_velocity *= self.ground_damping;
            } else {
                obj.is_grounded = false;
            }
        }
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates frame time and releases it in fixed-size steps.
/// At most `max_steps` run per frame; whole steps beyond that are dropped so a
/// stalled frame can't snowball, the fractional remainder is kept.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_steps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step: f32, max_steps: u32) -> Self {
        Self {
            step,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn from_settings(settings: &PhysicsSettings) -> Self {
        Self::new(settings.fixed_timestep, settings.max_steps_per_frame)
    }

    pub fn step_size(&self) -> f32 {
        self.step
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Adds `frame_dt` and calls `on_step(step)` for every whole step available.
    /// Returns how many steps ran. Negative or NaN deltas count as zero, and a
    /// non-positive step size never runs or accumulates anything.
    pub fn advance(&mut self, frame_dt: f32, mut on_step: impl FnMut(f32)) -> u32 {
        if !(self.step > 0.0) {
            return 0;
        }
        if frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            on_step(self.step);
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            let dropped = self.accumulator - self.accumulator % self.step;
            tracing::debug!(
                "physics fell behind: ran {} steps, dropping {:.4}s of simulation time",
                steps,
                dropped
            );
            self.accumulator %= self.step;
        }
        steps
    }
}
