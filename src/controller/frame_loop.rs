use glam::Vec2;

use crate::config::EngineConfig;
use crate::controller::camera_controller::CameraController;
use crate::controller::input::{InputProcessor, InputState};
use crate::controller::interaction::HandTool;
use crate::controller::physics::{FixedTimestep, PhysicsSystem};
use crate::controller::picking;
use crate::error::Result;
use crate::model::{Camera, ObjectKey, Primitive, Scene};
use crate::ui::{build_ui, UiContext, UiInputs};
use crate::view::RenderFrame;

/// Frame counter that reports once per window of at least a second
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FrameStats {
    /// Returns the new FPS value when a window closes
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed < 1.0 {
            return None;
        }
        self.fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Everything one editor session owns. The platform layer feeds it input and
/// frame time and gets back a [`RenderFrame`].
pub struct Editor {
    pub scene: Scene,
    pub camera: Camera,
    pub hand: HandTool,
    pub ui: UiContext,
    config: EngineConfig,
    input_processor: InputProcessor,
    camera_controller: CameraController,
    physics: PhysicsSystem,
    timestep: FixedTimestep,
    mouse_grabbed: bool,
    spawn_menu_open: bool,
    stats: FrameStats,
}

impl Editor {
    /// Fails if the config doesn't pass [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let scene = Scene::with_ground_plane(config.physics.ground_y);
        let camera = Camera::from_settings(&config.camera, config.window.width, config.window.height);

        Ok(Self {
            scene,
            camera,
            hand: HandTool::new(config.interaction.clone()),
            ui: UiContext::new(),
            input_processor: InputProcessor::default(),
            camera_controller: CameraController::from_settings(&config.camera),
            physics: PhysicsSystem::from_settings(&config.physics),
            timestep: FixedTimestep::from_settings(&config.physics),
            mouse_grabbed: true,
            spawn_menu_open: false,
            stats: FrameStats::default(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mouse_grabbed(&self) -> bool {
        self.mouse_grabbed
    }

    pub fn spawn_menu_open(&self) -> bool {
        self.spawn_menu_open
    }

    pub fn fps(&self) -> f32 {
        self.stats.fps()
    }

    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    /// Grabbing hides the cursor and drives the camera; letting go of the
    /// mouse also lets go of the held object.
    pub fn set_mouse_grabbed(&mut self, grabbed: bool) {
        if self.mouse_grabbed == grabbed {
            return;
        }
        self.mouse_grabbed = grabbed;
        if !grabbed {
            self.hand.release(&mut self.scene, self.camera.front());
        }
        tracing::info!("Mouse {}", if grabbed { "grabbed" } else { "released" });
    }

    pub fn toggle_spawn_menu(&mut self) {
        self.spawn_menu_open = !self.spawn_menu_open;
        if self.spawn_menu_open {
            self.set_mouse_grabbed(false);
            tracing::info!("Spawn menu opened");
        } else {
            self.set_mouse_grabbed(true);
            tracing::info!("Spawn menu closed");
        }
    }

    /// Spawn in front of the camera and put it straight into the hand
    pub fn spawn_and_hold(&mut self, primitive: Primitive) -> ObjectKey {
        let position = self.camera.position + self.camera.front() * self.config.interaction.initial_hold_distance;
        let key = self.scene.spawn_primitive(primitive, position);
        self.hand.grab(&mut self.scene, key);
        self.spawn_menu_open = false;
        self.set_mouse_grabbed(true);
        tracing::info!("Spawned and grabbed a {} from the spawn menu", primitive.name());
        key
    }

    /// Where the pointer is for UI and picking. A grabbed cursor is locked to
    /// the crosshair in the middle of the viewport.
    pub fn pointer(&self, input: &InputState) -> Vec2 {
        if self.mouse_grabbed {
            input.viewport * 0.5
        } else {
            input.cursor
        }
    }

    /// Run one frame: toggles, UI, camera and hand, fixed-step physics, then
    /// hand the scene to the renderer. Ends the input frame.
    pub fn update(&mut self, dt: f32, input: &mut InputState) -> RenderFrame {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        if let Some(fps) = self.stats.tick(dt) {
            tracing::debug!("FPS: {:.2}", fps);
        }

        if input.viewport.x > 0.0 && input.viewport.y > 0.0 {
            self.camera.set_aspect(input.viewport.x as u32, input.viewport.y as u32);
        }

        // Mode toggles
        if self.input_processor.wants_to_toggle_grab(input) {
            self.set_mouse_grabbed(!self.mouse_grabbed);
        }
        if self.input_processor.wants_to_toggle_spawn_menu(input) {
            self.toggle_spawn_menu();
        }

        // UI gets first claim on the pointer
        let pointer = self.pointer(input);
        self.ui.begin_frame(pointer, input.primary_pressed, input.primary_released);
        let ui_inputs = UiInputs {
            viewport: input.viewport,
            held: self.hand.held(),
            mouse_grabbed: self.mouse_grabbed,
            spawn_menu_open: self.spawn_menu_open,
            fps: self.stats.fps(),
        };
        let actions = build_ui(&mut self.ui, &self.config.ui, &mut self.scene, &ui_inputs);

        self.update_hand(input, pointer);
        self.update_camera(input, dt);

        // After the release check, so the click that spawns doesn't also throw
        if let Some(primitive) = actions.spawn {
            self.spawn_and_hold(primitive);
        }

        self.hand.update_held_pose(&mut self.scene, &self.camera, dt);

        let (physics, scene) = (&self.physics, &mut self.scene);
        self.timestep.advance(dt, |step| physics.step(scene, step));

        let ui_commands = self.ui.end_frame();
        input.end_frame();
        RenderFrame::build(&self.camera, &self.scene, ui_commands)
    }

    fn update_hand(&mut self, input: &InputState, pointer: Vec2) {
        if input.primary_released {
            self.hand.release(&mut self.scene, self.camera.front());
        }

        if self.hand.held().is_some() {
            if self.input_processor.is_rotating_held(input) {
                if self.hand.is_rotating() {
                    self.hand.update_rotation(input.cursor);
                } else {
                    self.hand.begin_rotate(input.cursor);
                }
            } else {
                self.hand.end_rotate();
            }
            self.hand.adjust_hold_distance(input.scroll());
        }

        let idle = self.hand.held().is_none();
        // Press and release inside one frame leaves the button up: no pickup
        let wants_pick = input.primary_pressed && input.primary_down;
        if idle && wants_pick && self.mouse_grabbed && !self.ui.is_active() {
            let ray = picking::cast_ray(pointer, input.viewport, &self.camera, self.camera.projection_matrix());
            if self.hand.try_pick(&mut self.scene, &ray).is_none() {
                tracing::debug!("Nothing to pick up within range");
            }
        }
    }

    fn update_camera(&mut self, input: &InputState, dt: f32) {
        if !self.mouse_grabbed || self.hand.is_rotating() || self.ui.is_active() {
            return;
        }
        self.camera_controller.apply_look(&mut self.camera, input.cursor_delta());
        let intent = self.input_processor.move_intent(input);
        self.camera_controller.update_movement(&mut self.camera, &intent, dt);
    }
}
