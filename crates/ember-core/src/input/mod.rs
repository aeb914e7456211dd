// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the input query contract and an event-driven implementation of it.
//!
//! Device polling happens outside the core. A platform layer translates raw
//! window events into [`InputEvent`]s and feeds them to an [`InputState`], which
//! answers the per-frame queries of the [`InputSource`] contract.

use std::collections::HashSet;

use crate::math::Vec2;

/// A backend-agnostic user input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A keyboard key was pressed.
    KeyPressed {
        /// Physical key name, e.g. `"KeyU"`.
        key_code: String,
    },
    /// A keyboard key was released.
    KeyReleased {
        /// Physical key name, e.g. `"KeyU"`.
        key_code: String,
    },
    /// A mouse button was pressed.
    MouseButtonPressed {
        /// The button that was pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseButtonReleased {
        /// The button that was released.
        button: MouseButton,
    },
    /// The cursor moved, in window coordinates (origin top-left).
    MouseMoved {
        /// New x coordinate.
        x: f32,
        /// New y coordinate.
        y: f32,
    },
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// The queries the engine core makes against the input layer each frame.
pub trait InputSource {
    /// Cursor position in window coordinates (origin top-left, y down).
    fn cursor_position(&self) -> Vec2;

    /// Whether `button` is currently held down.
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    /// Whether `button` was released since the previous frame.
    fn was_mouse_button_just_released(&self, button: MouseButton) -> bool;

    /// Whether the key named `key_code` was pressed since the previous frame.
    fn was_key_just_pressed(&self, key_code: &str) -> bool;
}

/// Accumulates [`InputEvent`]s into queryable per-frame state.
///
/// Call [`InputState::apply`] for every event of a frame, run the systems that
/// query it, then call [`InputState::advance_frame`] to clear edge triggers.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    cursor: Vec2,
    buttons_down: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    keys_down: HashSet<String>,
    keys_pressed: HashSet<String>,
}

impl InputState {
    /// Creates a state with no keys or buttons held and the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyPressed { key_code } => {
                if self.keys_down.insert(key_code.clone()) {
                    self.keys_pressed.insert(key_code.clone());
                }
            }
            InputEvent::KeyReleased { key_code } => {
                self.keys_down.remove(key_code);
            }
            InputEvent::MouseButtonPressed { button } => {
                self.buttons_down.insert(*button);
            }
            InputEvent::MouseButtonReleased { button } => {
                if self.buttons_down.remove(button) {
                    self.buttons_released.insert(*button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.cursor = Vec2::new(*x, *y);
            }
        }
    }

    /// Folds a batch of events into the state, in order.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Clears the "just pressed" and "just released" edges. Held state persists.
    pub fn advance_frame(&mut self) {
        self.buttons_released.clear();
        self.keys_pressed.clear();
    }

    /// Whether the key named `key_code` is held.
    pub fn is_key_down(&self, key_code: &str) -> bool {
        self.keys_down.contains(key_code)
    }
}

impl InputSource for InputState {
    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    fn was_mouse_button_just_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    fn was_key_just_pressed(&self, key_code: &str) -> bool {
        self.keys_pressed.contains(key_code)
    }
}
