/// Platform-agnostic input handling system
use std::collections::HashSet;

use glam::Vec2;

use crate::controller::camera_controller::MoveIntent;

/// Keys the editor cares about. Character keys are stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Shift,
    CapsLock,
    Escape,
}

impl Key {
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Keyboard events
    KeyDown(Key),
    KeyUp(Key),

    // Mouse events, positions in window pixels (top-left origin)
    CursorMoved { x: f32, y: f32 },
    MouseButton { button: MouseButton, is_down: bool },
    Scroll { delta_y: f32 },

    // Window events
    FocusLost,
    Resized { width: u32, height: u32 },
}

/// Per-frame input snapshot. Edge flags (`*_pressed`, `*_released`, keys
/// pressed this frame) hold for exactly one frame and are cleared by
/// [`InputState::end_frame`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed_keys: HashSet<Key>,
    keys_pressed_this_frame: HashSet<Key>,
    pub cursor: Vec2,
    cursor_delta: Vec2,
    scroll: f32,
    pub primary_down: bool,
    pub primary_pressed: bool,
    pub primary_released: bool,
    pub viewport: Vec2,
}

impl InputState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Vec2::new(width as f32, height as f32),
            ..Default::default()
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                // Repeats don't count as a new press
                if self.pressed_keys.insert(*key) {
                    self.keys_pressed_this_frame.insert(*key);
                }
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key);
            }
            InputEvent::CursorMoved { x, y } => {
                let pos = Vec2::new(*x, *y);
                self.cursor_delta += pos - self.cursor;
                self.cursor = pos;
            }
            InputEvent::MouseButton { button: MouseButton::Left, is_down } => {
                if *is_down && !self.primary_down {
                    self.primary_pressed = true;
                } else if !*is_down && self.primary_down {
                    self.primary_released = true;
                }
                self.primary_down = *is_down;
            }
            InputEvent::MouseButton { .. } => {}
            InputEvent::Scroll { delta_y } => {
                self.scroll += delta_y;
            }
            InputEvent::FocusLost => {
                self.clear_keys();
                if self.primary_down {
                    self.primary_down = false;
                    self.primary_released = true;
                }
            }
            InputEvent::Resized { width, height } => {
                self.viewport = Vec2::new(*width as f32, *height as f32);
            }
        }
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// True only on the frame the key went down
    pub fn was_key_pressed(&self, key: Key) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
        self.keys_pressed_this_frame.clear();
    }

    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Drop everything that only lives for one frame
    pub fn end_frame(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.cursor_delta = Vec2::ZERO;
        self.scroll = 0.0;
        self.primary_pressed = false;
        self.primary_released = false;
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub sprint: Key,
    pub super_speed: Key,
    pub rotate_held: Key,
    pub spawn_menu: Key,
    pub toggle_grab: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::Char('w'),
            backward: Key::Char('s'),
            left: Key::Char('a'),
            right: Key::Char('d'),
            sprint: Key::Shift,
            super_speed: Key::CapsLock,
            rotate_held: Key::Char('r'),
            spawn_menu: Key::Char('e'),
            toggle_grab: Key::Escape,
        }
    }
}

/// High-level input processor
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn move_intent(&self, input: &InputState) -> MoveIntent {
        MoveIntent {
            forward: input.is_key_pressed(self.bindings.forward),
            backward: input.is_key_pressed(self.bindings.backward),
            left: input.is_key_pressed(self.bindings.left),
            right: input.is_key_pressed(self.bindings.right),
            sprint: input.is_key_pressed(self.bindings.sprint),
            super_speed: input.is_key_pressed(self.bindings.super_speed),
        }
    }

    pub fn is_rotating_held(&self, input: &InputState) -> bool {
        input.is_key_pressed(self.bindings.rotate_held)
    }

    pub fn wants_to_toggle_spawn_menu(&self, input: &InputState) -> bool {
        input.was_key_pressed(self.bindings.spawn_menu)
    }

    pub fn wants_to_toggle_grab(&self, input: &InputState) -> bool {
        input.was_key_pressed(self.bindings.toggle_grab)
    }
}
