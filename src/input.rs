//! Polled keyboard and mouse state.
//!
//! The window keeps an [`InputState`] up to date so the render loop can ask
//! "is this key / button down" without looking at individual events.

use std::collections::HashSet;

use cgmath::Vector3;
use winit::{
    event::{ElementState, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
};

/// Keys the demo reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Other,
}

impl From<PhysicalKey> for Key {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(KeyCode::ArrowLeft) => Key::ArrowLeft,
            PhysicalKey::Code(KeyCode::ArrowRight) => Key::ArrowRight,
            PhysicalKey::Code(KeyCode::ArrowUp) => Key::ArrowUp,
            PhysicalKey::Code(KeyCode::ArrowDown) => Key::ArrowDown,
            PhysicalKey::Code(KeyCode::Space) => Key::Space,
            _ => Key::Other,
        }
    }
}

/// Translation an arrow key applies to the card. Other keys yield zero.
pub fn arrow_delta(key: Key, step: f32) -> Vector3<f32> {
    match key {
        Key::ArrowLeft => Vector3::new(-step, 0.0, 0.0),
        Key::ArrowRight => Vector3::new(step, 0.0, 0.0),
        Key::ArrowUp => Vector3::new(0.0, 0.0, step),
        Key::ArrowDown => Vector3::new(0.0, 0.0, -step),
        _ => Vector3::new(0.0, 0.0, 0.0),
    }
}

/// Keys and mouse buttons currently held.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn key(&mut self, key: Key, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_down.insert(key);
            }
            ElementState::Released => {
                self.keys_down.remove(&key);
            }
        }
    }

    pub fn button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.buttons_down.insert(button);
            }
            ElementState::Released => {
                self.buttons_down.remove(&button);
            }
        }
    }

    /// Releases are not delivered while unfocused; drop everything held.
    pub fn focus(&mut self, focused: bool) {
        if !focused {
            self.keys_down.clear();
            self.buttons_down.clear();
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}
