use glam::Vec2;

use crate::config::UiSettings;
use crate::model::{ObjectKey, Primitive, Scene};
use crate::ui::{UiContext, TEXT_COLOR};
use crate::utils::{Color, Rect};

const SPAWN_MENU_SIZE: Vec2 = Vec2::new(400.0, 300.0);
const SPAWN_MENU_COLOR: Color = [0.1, 0.1, 0.1, 0.9];
const SPAWN_ITEM_SIZE: f32 = 80.0;
const SPAWN_ITEM_SPACING: f32 = 10.0;
const CROSSHAIR_SIZE: f32 = 10.0;

const POSITION_RANGE: (f32, f32) = (-20.0, 20.0);
const SCALE_RANGE: (f32, f32) = (0.01, 5.0);

/// Editor state the panels need to see this frame
#[derive(Debug, Clone, Copy)]
pub struct UiInputs {
    pub viewport: Vec2,
    pub held: Option<ObjectKey>,
    pub mouse_grabbed: bool,
    pub spawn_menu_open: bool,
    pub fps: f32,
}

/// Requests the UI can't carry out itself
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiActions {
    pub spawn: Option<Primitive>,
}

/// Build the complete UI for one frame. The spawn menu is modal: while it is
/// open the side panels are not drawn.
pub fn build_ui(ui: &mut UiContext, settings: &UiSettings, scene: &mut Scene, inputs: &UiInputs) -> UiActions {
    let mut actions = UiActions::default();

    if inputs.spawn_menu_open {
        actions.spawn = draw_spawn_menu(ui, settings, inputs.viewport);
        return actions;
    }

    draw_tools_panel(ui, settings, scene, inputs);
    draw_properties_panel(ui, settings, scene, inputs);
    if inputs.mouse_grabbed {
        draw_crosshair(ui, inputs.viewport);
    }
    actions
}

/// Rects of the left-hand tools panel for `object_count` listed objects
#[derive(Debug, Clone, PartialEq)]
pub struct ToolsPanelLayout {
    pub import: Rect,
    pub objects: Vec<Rect>,
    pub panel: Rect,
}

pub fn tools_panel_layout(s: &UiSettings, object_count: usize) -> ToolsPanelLayout {
    let x = s.padding + s.padding;
    let width = s.panel_width - s.padding * 2.0;
    let mut y = s.padding;

    let import = Rect::new(x, y + s.padding, width, s.button_height);
    y += s.padding + s.button_height + s.element_spacing;

    // "Scene Objects:" heading
    y += s.text_height + s.element_spacing;

    let mut objects = Vec::with_capacity(object_count);
    for _ in 0..object_count {
        objects.push(Rect::new(x, y, width, s.button_height));
        y += s.button_height + s.element_spacing;
    }
    if object_count == 0 {
        y += s.text_height + s.element_spacing;
    }

    // FPS line
    y += s.text_height + s.element_spacing;

    let panel = Rect::new(s.padding, s.padding, s.panel_width, y);
    ToolsPanelLayout { import, objects, panel }
}

fn draw_tools_panel(ui: &mut UiContext, s: &UiSettings, scene: &mut Scene, inputs: &UiInputs) {
    let listed: Vec<ObjectKey> = scene.iter().map(|(k, _)| k).filter(|k| !scene.is_ground(*k)).collect();
    let layout = tools_panel_layout(s, listed.len());
    let mark = ui.begin_panel();

    if ui.button("import_model", layout.import, "Import Model - Not Supported") {
        tracing::info!("Importing models is not supported in this version");
    }

    let text_x = layout.import.x;
    let heading_y = layout.import.bottom() + s.element_spacing;
    ui.text(Vec2::new(text_x, heading_y), "Scene Objects:");

    if listed.is_empty() {
        ui.text(Vec2::new(text_x, heading_y + s.text_height + s.element_spacing), "No objects in scene.");
    }

    let selected = scene.selected();
    for (key, rect) in listed.iter().zip(&layout.objects) {
        let Some(obj) = scene.get(*key) else {
            continue;
        };
        let mut label = obj.id.clone();
        if selected == Some(*key) {
            label.push_str(" (Selected)");
        }
        if inputs.held == Some(*key) {
            label.push_str(" (Held)");
        }
        if ui.button(format!("object_{}", key.index()), *rect, &label) {
            tracing::info!("Selected object: {}", obj.id);
            scene.select(Some(*key));
        }
    }

    let fps_y = layout.panel.bottom() - s.text_height - s.element_spacing;
    ui.text(Vec2::new(text_x, fps_y), &format!("FPS: {:.0}", inputs.fps));

    ui.end_panel(mark, layout.panel);
}

fn draw_properties_panel(ui: &mut UiContext, s: &UiSettings, scene: &mut Scene, inputs: &UiInputs) {
    let Some(key) = scene.selected() else {
        return;
    };
    let Some(obj) = scene.get_mut(key) else {
        return;
    };

    let panel_x = inputs.viewport.x - s.panel_width - s.padding;
    let panel_y = s.padding;
    let x = panel_x + s.padding;
    let width = s.panel_width - s.padding * 2.0;
    let mut y = panel_y + s.padding;
    let mark = ui.begin_panel();

    ui.text(Vec2::new(x, y), &format!("Properties: {}", obj.id));
    y += s.text_height + s.element_spacing;

    let sliders: [(&str, &str, &mut f32, (f32, f32)); 6] = [
        ("pos_x", "Position X:", &mut obj.position.x, POSITION_RANGE),
        ("pos_y", "Position Y:", &mut obj.position.y, POSITION_RANGE),
        ("pos_z", "Position Z:", &mut obj.position.z, POSITION_RANGE),
        ("scale_x", "Scale X:", &mut obj.scale.x, SCALE_RANGE),
        ("scale_y", "Scale Y:", &mut obj.scale.y, SCALE_RANGE),
        ("scale_z", "Scale Z:", &mut obj.scale.z, SCALE_RANGE),
    ];
    for (i, (id, label, value, (min, max))) in sliders.into_iter().enumerate() {
        ui.text(Vec2::new(x, y), label);
        y += s.element_spacing;
        ui.slider(id, Rect::new(x, y, width, s.slider_height), value, min, max);
        y += s.slider_height + s.element_spacing;
        if i == 2 || i == 5 {
            y += s.element_spacing;
        }
    }

    for (axis, v) in ["X", "Y", "Z"].iter().zip(obj.velocity.to_array()) {
        ui.text(Vec2::new(x, y), &format!("Velocity {}: {:.2}", axis, v));
        y += s.text_height + s.element_spacing;
    }
    for (axis, w) in ["X", "Y", "Z"].iter().zip(obj.angular_velocity.to_array()) {
        ui.text(Vec2::new(x, y), &format!("Ang. Vel {}: {:.2}", axis, w.to_degrees()));
        y += s.text_height + s.element_spacing;
    }

    if inputs.held == Some(key) {
        ui.text(Vec2::new(x, y), "Is Kinematic: true (Held)");
    } else {
        let label = format!("Is Kinematic: {}", obj.is_kinematic);
        if ui.button("toggle_kinematic", Rect::new(x, y, width, s.button_height), &label) {
            obj.is_kinematic = !obj.is_kinematic;
            obj.stop();
            tracing::info!("{} is_kinematic = {}", obj.id, obj.is_kinematic);
        }
    }
    y += s.button_height + s.element_spacing;

    ui.end_panel(mark, Rect::new(panel_x, panel_y, s.panel_width, y - panel_y + s.padding));
}

/// Rects of the centred spawn menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnMenuLayout {
    pub panel: Rect,
    pub cube: Rect,
    pub sphere: Rect,
}

pub fn spawn_menu_layout(s: &UiSettings, viewport: Vec2) -> SpawnMenuLayout {
    let origin = (viewport - SPAWN_MENU_SIZE) * 0.5;
    let panel = Rect::new(origin.x, origin.y, SPAWN_MENU_SIZE.x, SPAWN_MENU_SIZE.y);

    let grid_x = panel.x + s.padding;
    let grid_y = panel.y + s.padding + s.text_height + s.element_spacing;
    let cube = Rect::new(grid_x, grid_y, SPAWN_ITEM_SIZE, SPAWN_ITEM_SIZE);
    let sphere = Rect::new(grid_x + SPAWN_ITEM_SIZE + SPAWN_ITEM_SPACING, grid_y, SPAWN_ITEM_SIZE, SPAWN_ITEM_SIZE);

    SpawnMenuLayout { panel, cube, sphere }
}

fn draw_spawn_menu(ui: &mut UiContext, s: &UiSettings, viewport: Vec2) -> Option<Primitive> {
    let layout = spawn_menu_layout(s, viewport);
    ui.rect(layout.panel, SPAWN_MENU_COLOR);
    ui.text(Vec2::new(layout.panel.x + s.padding, layout.panel.y + s.padding), "Spawn Menu");

    let mut spawn = None;
    if ui.button("spawn_cube", layout.cube, "Cube") {
        spawn = Some(Primitive::Cube);
    }
    if ui.button("spawn_sphere", layout.sphere, "Sphere") {
        spawn = Some(Primitive::Sphere);
    }
    spawn
}

fn draw_crosshair(ui: &mut UiContext, viewport: Vec2) {
    let c = viewport * 0.5;
    ui.rect(Rect::new(c.x - CROSSHAIR_SIZE, c.y - 0.5, CROSSHAIR_SIZE * 2.0, 1.0), TEXT_COLOR);
    ui.rect(Rect::new(c.x - 0.5, c.y - CROSSHAIR_SIZE, 1.0, CROSSHAIR_SIZE * 2.0), TEXT_COLOR);
}
