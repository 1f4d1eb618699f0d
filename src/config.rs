use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

// =============================================================================
// Engine configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Vertical acceleration in m/s^2
    pub gravity: f32,
    pub fixed_timestep: f32,
    pub ground_y: f32,
    /// Multiplier applied to horizontal and angular velocity on ground contact
    pub ground_damping: f32,
    /// Upper bound of fixed steps run in one frame; leftover time is dropped
    pub max_steps_per_frame: u32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            fixed_timestep: 1.0 / 60.0,
            ground_y: 0.0,
            ground_damping: 0.9,
            max_steps_per_frame: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Units per second
    pub move_speed: f32,
    /// Degrees per pixel
    pub mouse_sensitivity: f32,
    pub sprint_multiplier: f32,
    pub super_speed_multiplier: f32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub start_position: [f32; 3],
    pub start_yaw: f32,
    pub start_pitch: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            mouse_sensitivity: 0.1,
            sprint_multiplier: 2.0,
            super_speed_multiplier: 5.0,
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 1000.0,
            start_position: [0.0, 2.0, 5.0],
            start_yaw: -90.0,
            start_pitch: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub pickup_range: f32,
    pub throw_force: f32,
    pub initial_hold_distance: f32,
    pub min_hold_distance: f32,
    pub max_hold_distance: f32,
    pub scroll_sensitivity: f32,
    /// Radians per second per pixel of cursor travel while rotating
    pub rotate_sensitivity: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            pickup_range: 10.0,
            throw_force: 10.0,
            initial_hold_distance: 2.0,
            min_hold_distance: 1.0,
            max_hold_distance: 5.0,
            scroll_sensitivity: 0.1,
            rotate_sensitivity: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub panel_width: f32,
    pub padding: f32,
    pub button_height: f32,
    pub slider_height: f32,
    pub element_spacing: f32,
    pub text_height: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            panel_width: 250.0,
            padding: 10.0,
            button_height: 30.0,
            slider_height: 20.0,
            element_spacing: 5.0,
            text_height: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Holy Engine".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Daily-rolling log file; `None` logs to stderr only
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: Some(PathBuf::from("logs/holy-engine.log")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub physics: PhysicsSettings,
    pub camera: CameraSettings,
    pub interaction: InteractionSettings,
    pub ui: UiSettings,
    pub window: WindowSettings,
    pub logging: LoggingSettings,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        if !(p.fixed_timestep > 0.0) {
            return Err(invalid("physics.fixed_timestep must be positive"));
        }
        if !(0.0..=1.0).contains(&p.ground_damping) {
            return Err(invalid("physics.ground_damping must lie in [0, 1]"));
        }
        if p.max_steps_per_frame == 0 {
            return Err(invalid("physics.max_steps_per_frame must be at least 1"));
        }

        let c = &self.camera;
        if !(c.z_near > 0.0 && c.z_far > c.z_near) {
            return Err(invalid("camera clip planes must satisfy 0 < z_near < z_far"));
        }
        if !(c.fov_y_degrees > 0.0 && c.fov_y_degrees < 180.0) {
            return Err(invalid("camera.fov_y_degrees must lie in (0, 180)"));
        }

        let i = &self.interaction;
        if !(i.min_hold_distance > 0.0 && i.min_hold_distance <= i.max_hold_distance) {
            return Err(invalid("hold distance range must satisfy 0 < min <= max"));
        }
        if i.pickup_range <= 0.0 {
            return Err(invalid("interaction.pickup_range must be positive"));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window size must be non-zero"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> EngineError {
    EngineError::InvalidConfig(msg.to_string())
}
