//! Immediate-mode widgets. Nothing is retained between frames except the
//! single active element; each widget call both lays the widget out and
//! answers whether it was interacted with.

pub mod panels;

use std::fmt;

use glam::Vec2;

use crate::utils::{Color, Rect};
use crate::view::DrawCommand;

pub use panels::{build_ui, spawn_menu_layout, tools_panel_layout, SpawnMenuLayout, ToolsPanelLayout, UiActions, UiInputs};

pub const BUTTON_COLOR: Color = [0.2, 0.2, 0.2, 1.0];
pub const BUTTON_HOVER_COLOR: Color = [0.3, 0.3, 0.3, 1.0];
pub const BUTTON_PRESSED_COLOR: Color = [0.1, 0.1, 0.1, 1.0];
pub const TRACK_COLOR: Color = [0.3, 0.3, 0.3, 1.0];
pub const KNOB_COLOR: Color = [0.6, 0.6, 0.6, 1.0];
pub const KNOB_HOVER_COLOR: Color = [0.8, 0.8, 0.8, 1.0];
pub const KNOB_ACTIVE_COLOR: Color = [0.9, 0.9, 0.9, 1.0];
pub const PANEL_COLOR: Color = [0.15, 0.15, 0.15, 0.8];
pub const TEXT_COLOR: Color = [1.0, 1.0, 1.0, 1.0];

/// Stable widget identity, independent of the text a widget displays
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WidgetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draw-list position where a panel's background goes once its size is known
#[derive(Debug, Clone, Copy)]
pub struct PanelMark(usize);

/// Per-frame UI state plus the one piece that survives frames: the active element.
#[derive(Debug, Default)]
pub struct UiContext {
    active: Option<WidgetId>,
    mouse: Vec2,
    pressed: bool,
    released: bool,
    commands: Vec<DrawCommand>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch this frame's pointer state. `pressed`/`released` are edges.
    pub fn begin_frame(&mut self, mouse: Vec2, pressed: bool, released: bool) {
        self.mouse = mouse;
        self.pressed = pressed;
        self.released = released;
        self.commands.clear();
    }

    /// Finish the frame and hand over its draw list. A mouse release always
    /// frees the active element, whichever widget held it.
    pub fn end_frame(&mut self) -> Vec<DrawCommand> {
        if self.released {
            if let Some(id) = self.active.take() {
                tracing::trace!("released UI element {}", id);
            }
        }
        self.pressed = false;
        self.released = false;
        std::mem::take(&mut self.commands)
    }

    /// True while some widget owns the pointer; the 3D scene must ignore input
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_element(&self) -> Option<&WidgetId> {
        self.active.as_ref()
    }

    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }

    pub fn is_hovered(&self, rect: Rect) -> bool {
        rect.contains(self.mouse)
    }

    /// Claim the pointer for `id` unless another element already has it
    fn try_claim(&mut self, id: &WidgetId) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(id.clone());
        true
    }

    fn holds(&self, id: &WidgetId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    /// Text rendering needs a font atlas the renderer doesn't have yet, so
    /// labels only show up in trace output.
    pub fn text(&mut self, pos: Vec2, text: &str) {
        tracing::trace!("UI text at ({:.1}, {:.1}): {}", pos.x, pos.y, text);
    }

    /// Returns true on the frame a press that started on this button is
    /// released over it.
    pub fn button(&mut self, id: impl Into<WidgetId>, rect: Rect, label: &str) -> bool {
        let id = id.into();
        let hovered = self.is_hovered(rect);

        if hovered && self.pressed {
            self.try_claim(&id);
        }
        let holds = self.holds(&id);

        let color = if hovered && holds {
            BUTTON_PRESSED_COLOR
        } else if hovered {
            BUTTON_HOVER_COLOR
        } else {
            BUTTON_COLOR
        };
        self.rect(rect, color);
        self.text(rect.center(), label);

        hovered && self.released && holds
    }

    /// Horizontal slider with absolute pointer mapping. Returns true when the
    /// value changed this frame.
    pub fn slider(&mut self, id: impl Into<WidgetId>, rect: Rect, value: &mut f32, min: f32, max: f32) -> bool {
        let id = id.into();
        let hovered = self.is_hovered(rect);

        if hovered && self.pressed {
            self.try_claim(&id);
        }
        let dragging = self.holds(&id);

        let before = *value;
        if dragging {
            *value = slider_value(self.mouse.x, rect, min, max);
        }

        self.rect(rect, TRACK_COLOR);
        let knob_color = if dragging {
            KNOB_ACTIVE_COLOR
        } else if hovered {
            KNOB_HOVER_COLOR
        } else {
            KNOB_COLOR
        };
        self.rect(knob_rect(rect, *value, min, max), knob_color);

        *value != before
    }

    pub fn begin_panel(&self) -> PanelMark {
        PanelMark(self.commands.len())
    }

    /// Insert the panel background beneath everything drawn since `mark`
    pub fn end_panel(&mut self, mark: PanelMark, rect: Rect) {
        let index = mark.0.min(self.commands.len());
        self.commands.insert(index, DrawCommand::Rect { rect, color: PANEL_COLOR });
    }
}

/// Pointer x mapped onto [min, max]; anything outside the track pins to an end
pub fn slider_value(pointer_x: f32, track: Rect, min: f32, max: f32) -> f32 {
    if track.width <= 0.0 || max <= min {
        return min;
    }
    let t = (pointer_x - track.x) / track.width;
    if t <= 0.0 {
        min
    } else if t >= 1.0 {
        max
    } else {
        (min + t * (max - min)).clamp(min, max)
    }
}

/// Square knob centred on the value, kept inside the track
pub fn knob_rect(track: Rect, value: f32, min: f32, max: f32) -> Rect {
    let t = if max > min { ((value - min) / (max - min)).clamp(0.0, 1.0) } else { 0.0 };
    let size = track.height;
    let x = (track.x + t * track.width - size * 0.5)
        .min(track.right() - size)
        .max(track.x);
    Rect::new(x, track.y, size, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: Rect = Rect::new(100.0, 50.0, 200.0, 20.0);

    fn frame<R>(ui: &mut UiContext, mouse: Vec2, pressed: bool, released: bool, f: impl FnOnce(&mut UiContext) -> R) -> R {
        ui.begin_frame(mouse, pressed, released);
        let r = f(ui);
        ui.end_frame();
        r
    }

    #[test]
    fn overlapping_buttons_only_first_claims() {
        let mut ui = UiContext::new();
        let a = Rect::new(0.0, 0.0, 100.0, 30.0);
        let b = Rect::new(50.0, 0.0, 100.0, 30.0);
        let press = Vec2::new(75.0, 15.0);

        ui.begin_frame(press, true, false);
        ui.button("a", a, "A");
        ui.button("b", b, "B");
        assert_eq!(ui.active_element(), Some(&WidgetId::from("a")));
        ui.end_frame();

        ui.begin_frame(press, false, true);
        let clicked_a = ui.button("a", a, "A");
        let clicked_b = ui.button("b", b, "B");
        ui.end_frame();
        assert!(clicked_a);
        assert!(!clicked_b);
        assert!(!ui.is_active());
    }

    #[test]
    fn drag_off_button_is_not_a_click() {
        let mut ui = UiContext::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 30.0);
        frame(&mut ui, Vec2::new(10.0, 10.0), true, false, |ui| ui.button("ok", rect, "OK"));
        let clicked = frame(&mut ui, Vec2::new(400.0, 400.0), false, true, |ui| ui.button("ok", rect, "OK"));
        assert!(!clicked);
        assert!(!ui.is_active());
    }

    #[test]
    fn release_without_press_is_not_a_click() {
        let mut ui = UiContext::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 30.0);
        let clicked = frame(&mut ui, Vec2::new(10.0, 10.0), false, true, |ui| ui.button("ok", rect, "OK"));
        assert!(!clicked);
    }

    #[test]
    fn labels_do_not_collide_when_ids_differ() {
        let mut ui = UiContext::new();
        let top = Rect::new(0.0, 0.0, 100.0, 30.0);
        let bottom = Rect::new(0.0, 40.0, 100.0, 30.0);
        let mouse = Vec2::new(10.0, 50.0);

        frame(&mut ui, mouse, true, false, |ui| {
            ui.button("obj_0", top, "Cube");
            ui.button("obj_1", bottom, "Cube");
        });
        let (a, b) = frame(&mut ui, mouse, false, true, |ui| {
            (ui.button("obj_0", top, "Cube"), ui.button("obj_1", bottom, "Cube"))
        });
        assert!(!a && b);
    }

    #[test]
    fn slider_drag_to_track_end_reaches_max_exactly() {
        let mut ui = UiContext::new();
        let mut value = 5.0;
        let start = Vec2::new(TRACK.x, TRACK.y + 10.0);
        let end = Vec2::new(TRACK.right(), TRACK.y + 10.0);

        frame(&mut ui, start, true, false, |ui| ui.slider("v", TRACK, &mut value, 0.0, 10.0));
        assert_eq!(value, 0.0);

        for step in 1..=10 {
            let mouse = start.lerp(end, step as f32 / 10.0);
            frame(&mut ui, mouse, false, false, |ui| ui.slider("v", TRACK, &mut value, 0.0, 10.0));
        }
        frame(&mut ui, end, false, true, |ui| ui.slider("v", TRACK, &mut value, 0.0, 10.0));

        assert_eq!(value, 10.0);
        assert!(!ui.is_active());
    }

    #[test]
    fn slider_clamps_pointer_outside_track() {
        for x in [-500.0, 0.0, 99.0, 100.0] {
            assert_eq!(slider_value(x, TRACK, -20.0, 20.0), -20.0);
        }
        for x in [300.0, 301.0, 5000.0] {
            assert_eq!(slider_value(x, TRACK, -20.0, 20.0), 20.0);
        }
        assert!((slider_value(200.0, TRACK, -20.0, 20.0)).abs() < 1e-6);
    }

    #[test]
    fn slider_keeps_tracking_after_leaving_rect() {
        let mut ui = UiContext::new();
        let mut value = 0.0;
        frame(&mut ui, Vec2::new(150.0, 60.0), true, false, |ui| ui.slider("v", TRACK, &mut value, 0.0, 1.0));
        frame(&mut ui, Vec2::new(250.0, 300.0), false, false, |ui| ui.slider("v", TRACK, &mut value, 0.0, 1.0));
        assert!((value - 0.75).abs() < 1e-6);
    }

    #[test]
    fn slider_ignores_press_while_button_active() {
        let mut ui = UiContext::new();
        let mut value = 3.0;
        let button = Rect::new(100.0, 50.0, 50.0, 20.0);
        frame(&mut ui, Vec2::new(120.0, 60.0), true, false, |ui| {
            ui.button("b", button, "B");
            ui.slider("v", TRACK, &mut value, 0.0, 10.0)
        });
        assert_eq!(value, 3.0);
        assert_eq!(ui.active_element(), Some(&WidgetId::from("b")));
    }

    #[test]
    fn degenerate_slider_is_safe() {
        assert_eq!(slider_value(150.0, Rect::new(100.0, 0.0, 0.0, 10.0), 0.0, 1.0), 0.0);
        assert_eq!(slider_value(150.0, TRACK, 2.0, 2.0), 2.0);
        let knob = knob_rect(TRACK, 5.0, 1.0, 1.0);
        assert_eq!(knob.x, TRACK.x);
    }

    #[test]
    fn knob_stays_inside_track() {
        let low = knob_rect(TRACK, -100.0, 0.0, 10.0);
        let high = knob_rect(TRACK, 100.0, 0.0, 10.0);
        assert_eq!(low.x, TRACK.x);
        assert_eq!(high.x + high.width, TRACK.right());
    }

    #[test]
    fn panel_background_goes_under_its_widgets() {
        let mut ui = UiContext::new();
        ui.begin_frame(Vec2::ZERO, false, false);
        ui.rect(Rect::new(0.0, 0.0, 1.0, 1.0), TEXT_COLOR);
        let mark = ui.begin_panel();
        ui.button("b", Rect::new(10.0, 10.0, 50.0, 20.0), "B");
        ui.end_panel(mark, Rect::new(0.0, 0.0, 100.0, 100.0));
        let commands = ui.end_frame();

        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[1], DrawCommand::Rect { color, .. } if color == PANEL_COLOR));
    }
}
