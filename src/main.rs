use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::{Vec2, Vec3};

use holy_engine::controller::{InputEvent, InputState, Key, MouseButton};
use holy_engine::model::Primitive;
use holy_engine::ui::spawn_menu_layout;
use holy_engine::{logging, Editor, EngineConfig};

/// Headless editor session: drops a box, spawns a sphere from the spawn menu,
/// carries and spins it, throws it and logs where everything ends up.
#[derive(Parser, Debug)]
#[command(name = "holy-engine", about = "Headless driver for the scene editor core")]
struct Cli {
    /// TOML config file; built-in defaults when omitted
    #[arg(long, env = "HOLY_ENGINE_CONFIG")]
    config: Option<PathBuf>,

    /// Frames to simulate after the throw
    #[arg(long, default_value_t = 180)]
    frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
}

/// Feeds synthetic platform events into the editor one frame at a time
struct Session {
    editor: Editor,
    input: InputState,
    dt: f32,
}

impl Session {
    fn new(config: EngineConfig, dt: f32) -> holy_engine::Result<Self> {
        let input = InputState::new(config.window.width, config.window.height);
        Ok(Self { editor: Editor::new(config)?, input, dt })
    }

    fn run(&mut self, frames: u32) {
        for _ in 0..frames {
            self.editor.update(self.dt, &mut self.input);
        }
    }

    fn event(&mut self, event: InputEvent) {
        self.input.process_event(&event);
    }

    fn tap_key(&mut self, key: Key) {
        self.event(InputEvent::KeyDown(key));
        self.run(1);
        self.event(InputEvent::KeyUp(key));
    }

    fn click_at(&mut self, pos: Vec2) {
        self.event(InputEvent::CursorMoved { x: pos.x, y: pos.y });
        self.event(InputEvent::MouseButton { button: MouseButton::Left, is_down: true });
        self.run(1);
        self.event(InputEvent::MouseButton { button: MouseButton::Left, is_down: false });
        self.run(1);
    }

    fn log_poses(&self, stage: &str) {
        for (key, obj) in self.editor.scene.iter() {
            if self.editor.scene.is_ground(key) {
                continue;
            }
            tracing::info!(
                "[{}] {} pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2}) grounded={} kinematic={}",
                stage,
                obj.id,
                obj.position.x,
                obj.position.y,
                obj.position.z,
                obj.velocity.x,
                obj.velocity.y,
                obj.velocity.z,
                obj.is_grounded,
                obj.is_kinematic,
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    logging::init(&config.logging);
    if let Some(path) = &cli.config {
        tracing::info!("Using config {}", path.display());
    }
    if !(cli.dt > 0.0) {
        anyhow::bail!("--dt must be positive, got {}", cli.dt);
    }

    let ui_settings = config.ui.clone();
    let mut session = Session::new(config, cli.dt).context("starting editor session")?;

    // Drop a box and let it land
    session.editor.scene.spawn_primitive(Primitive::Cube, Vec3::new(0.0, 5.0, -4.0));
    session.run(120);
    session.log_poses("dropped");

    // Spawn a sphere through the spawn menu; it lands in the hand
    session.tap_key(Key::Char('e'));
    let viewport = session.input.viewport;
    session.click_at(spawn_menu_layout(&ui_settings, viewport).sphere.center());

    // Walk forward with it, pulling it closer
    session.event(InputEvent::KeyDown(Key::Char('w')));
    session.event(InputEvent::Scroll { delta_y: 5.0 });
    session.run(30);
    session.event(InputEvent::KeyUp(Key::Char('w')));

    // Spin it while held
    session.event(InputEvent::KeyDown(Key::Char('r')));
    session.run(1);
    let start = session.input.cursor;
    for i in 1..=10 {
        session.event(InputEvent::CursorMoved { x: start.x + i as f32 * 4.0, y: start.y });
        session.run(1);
    }
    session.log_poses("carried");

    // Throw it, still spinning
    let cursor = session.input.cursor;
    session.click_at(cursor);
    session.event(InputEvent::KeyUp(Key::Char('r')));
    session.run(cli.frames);
    session.log_poses("thrown");

    tracing::info!("Session finished, {:.1} FPS simulated", session.editor.fps());
    Ok(())
}
