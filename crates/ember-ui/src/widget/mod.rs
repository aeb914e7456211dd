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

//! A single node of the widget tree.

mod kind;
mod render;

pub use self::kind::{WidgetKind, DEFAULT_FONT_SIZE, GLYPH_ASPECT};
pub(crate) use self::render::{draw_widget, InheritedStyle};

use std::any::Any;

use ember_core::renderer::{MaterialHandle, TextureHandle};
use ember_core::{PropertyGetError, PropertySetResult};

use crate::bounds::WidgetBounds;
use crate::properties::{names, StatefulProperties};
use crate::state::WidgetState;

/// A handle to a widget in a [`crate::WidgetTree`].
///
/// The generation makes handles to removed widgets resolve to nothing even
/// after their slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId {
    /// Slot index in the tree.
    pub index: u32,
    /// Generation of the slot when the handle was issued.
    pub generation: u32,
}

/// A widget: its variant, layered properties, interaction state, computed
/// bounds, and links to its parent and children.
#[derive(Debug, Clone)]
pub struct Widget {
    pub(crate) kind: WidgetKind,
    pub(crate) properties: StatefulProperties,
    pub(crate) state: WidgetState,
    pub(crate) previous_state: WidgetState,
    pub(crate) bounds: WidgetBounds,
    pub(crate) texture: Option<TextureHandle>,
    pub(crate) material: Option<MaterialHandle>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) parent: Option<WidgetId>,
}

impl Widget {
    /// Creates a detached widget with the variant's default properties.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            properties: kind.default_properties(),
            state: WidgetState::Active,
            previous_state: WidgetState::Active,
            bounds: WidgetBounds::default(),
            texture: None,
            material: None,
            children: Vec::new(),
            parent: None,
        }
    }

    /// The widget's variant.
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// The `Name` property.
    pub fn name(&self) -> String {
        self.property(names::NAME)
    }

    /// Current interaction state.
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// The state before the last transition.
    pub fn previous_state(&self) -> WidgetState {
        self.previous_state
    }

    /// Bounds computed at the last layout.
    pub fn bounds(&self) -> &WidgetBounds {
        &self.bounds
    }

    /// The parent, `None` for roots and detached widgets.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children in paint order (last is drawn on top).
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// The layered property store.
    pub fn properties(&self) -> &StatefulProperties {
        &self.properties
    }

    /// Sets a property for all states. Does not re-run layout; use
    /// [`crate::WidgetTree::set_property`] for widgets already in a tree.
    pub fn set_property<T: Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> PropertySetResult {
        self.properties.set(name, value)
    }

    /// Sets a property that only applies while the widget is in `state`.
    pub fn set_state_property<T: Any + Send + Sync>(
        &mut self,
        state: WidgetState,
        name: impl Into<String>,
        value: T,
    ) -> PropertySetResult {
        self.properties.set_for_state(state, name, value)
    }

    /// Resolves a property for the current state.
    pub fn try_property<T: Any + Clone>(&self, name: &str) -> Result<T, PropertyGetError> {
        self.properties.get(name, self.state)
    }

    /// Resolves a property for the current state, logging a warning and
    /// returning `T::default()` when it is missing or stored under another type.
    pub fn property<T: Any + Clone + Default>(&self, name: &str) -> T {
        self.try_property(name).unwrap_or_else(|e| {
            log::warn!("Widget property lookup failed: {e}");
            T::default()
        })
    }

    /// Resolves a property that may legitimately be absent. Only a type
    /// mismatch is reported.
    pub fn optional_property<T: Any + Clone>(&self, name: &str) -> Option<T> {
        match self.try_property(name) {
            Ok(value) => Some(value),
            Err(e @ PropertyGetError::WrongType { .. }) => {
                log::warn!("Widget property lookup failed: {e}");
                None
            }
            Err(_) => None,
        }
    }

    /// The texture the widget's fill samples, if any.
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    /// Sets the fill texture.
    pub fn set_texture(&mut self, texture: Option<TextureHandle>) {
        self.texture = texture;
    }

    /// The material the widget is drawn with, if not the renderer default.
    pub fn material(&self) -> Option<&MaterialHandle> {
        self.material.as_ref()
    }

    /// Sets the material.
    pub fn set_material(&mut self, material: Option<MaterialHandle>) {
        self.material = material;
    }

    /// Whether the widget may be highlighted, pressed, and clicked.
    pub fn is_clickable(&self) -> bool {
        self.state.is_interactive()
    }

    /// For checkboxes, the `Checked` property; `false` for other variants.
    pub fn is_checked(&self) -> bool {
        self.kind == WidgetKind::Checkbox && self.property::<bool>(names::CHECKED)
    }

    pub(crate) fn set_state(&mut self, state: WidgetState) {
        if self.state != state {
            self.previous_state = self.state;
            self.state = state;
        }
    }

    /// Sets the state before the widget is added to a tree.
    pub fn with_state(mut self, state: WidgetState) -> Self {
        self.set_state(state);
        self
    }
}
