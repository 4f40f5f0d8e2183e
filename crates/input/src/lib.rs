//! Input handling for keyboard and mouse.
//!
//! Platform events are folded into an [`InputState`]; the gameplay core only
//! ever reads an [`InputSnapshot`] taken once per frame.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{DeviceEvent, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Logical actions the gameplay core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

impl Action {
    /// Map a physical key to a logical action. Unrecognized keys map to `None`.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(Action::Forward),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(Action::Backward),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(Action::Left),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(Action::Right),
            KeyCode::Space => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Per-frame view of the input the core is allowed to read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Jump was pressed since the previous frame.
    pub jump: bool,
    /// Primary action (fire) was pressed since the previous frame.
    pub fire: bool,
    /// Accumulated relative mouse movement since the previous frame.
    pub look_delta: Vec2,
}

impl InputSnapshot {
    /// Signed movement axes: `x` = right minus left, `y` = forward minus backward.
    /// Opposite keys cancel out.
    pub fn movement_axes(&self) -> Vec2 {
        Vec2::new(
            f32::from(u8::from(self.right)) - f32::from(u8::from(self.left)),
            f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward)),
        )
    }
}

/// Manages input state between frames.
#[derive(Debug, Default)]
pub struct InputState {
    /// Actions currently held down.
    held: HashSet<Action>,
    /// Actions pressed since the last frame began.
    pressed: HashSet<Action>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Primary button pressed since the last frame began.
    fire_pressed: bool,

    /// Mouse delta accumulated since the last frame began.
    accumulated_delta: Vec2,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the snapshot for this frame and clear per-frame triggers.
    pub fn begin_frame(&mut self) -> InputSnapshot {
        let snapshot = self.snapshot();
        self.pressed.clear();
        self.fire_pressed = false;
        self.accumulated_delta = Vec2::ZERO;
        snapshot
    }

    /// Current snapshot without clearing anything.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            forward: self.is_held(Action::Forward),
            backward: self.is_held(Action::Backward),
            left: self.is_held(Action::Left),
            right: self.is_held(Action::Right),
            jump: self.pressed.contains(&Action::Jump),
            fire: self.fire_pressed,
            look_delta: self.accumulated_delta,
        }
    }

    /// Process a keyboard event. Keys without an action are ignored.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        let Some(action) = Action::from_key(key) else {
            log::trace!("Ignoring unmapped key {:?}", key);
            return;
        };
        match state {
            ElementState::Pressed => {
                if self.held.insert(action) {
                    self.pressed.insert(action);
                }
            }
            ElementState::Released => {
                self.held.remove(&action);
            }
        }
    }

    /// Process a mouse button event. The left button is the primary action.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.mouse_held.insert(button) && button == MouseButton::Left {
                    self.fire_pressed = true;
                }
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process relative mouse movement. Dropped while the cursor is not captured.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.cursor_locked {
            self.accumulated_delta.x += delta.0 as f32;
            self.accumulated_delta.y += delta.1 as f32;
        }
    }

    /// Check if an action is currently held.
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Check if the cursor is locked.
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Set cursor lock state. Losing capture releases every held key, since
    /// the platform stops delivering key-up events to us.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        if self.cursor_locked && !locked {
            self.held.clear();
            self.mouse_held.clear();
            self.accumulated_delta = Vec2::ZERO;
        }
        self.cursor_locked = locked;
    }

    /// Fold a window event into the input state.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.process_keyboard(key, event.state);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.process_mouse_button(*button, *state);
            }
            WindowEvent::Focused(false) => self.set_cursor_locked(false),
            _ => {}
        }
    }

    /// Fold a device event (raw mouse motion) into the input state.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.process_mouse_motion(*delta);
        }
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
