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

//! Widget properties layered by interaction state.

use std::any::Any;
use std::collections::HashMap;

use ember_core::{NamedProperties, PropertyGetError, PropertySetResult};

use crate::state::WidgetState;

/// Names of the properties the widget tree understands.
pub mod names {
    /// `String`: identifier used by lookups and click events.
    pub const NAME: &str = "Name";
    /// `Vec2`: offset from the parent's origin.
    pub const OFFSET: &str = "Offset";
    /// `Vec2`: extent of a childless widget.
    pub const SIZE: &str = "Size";
    /// `Vec2`: the content box is stretched about its center up to this size.
    pub const MIN_SIZE: &str = "MinSize";
    /// `Vec2`: space between content and border.
    pub const PADDING: &str = "Padding";
    /// `Vec2`: space outside the border.
    pub const MARGIN: &str = "Margin";
    /// `Rgba`: fill color.
    pub const BACKGROUND_COLOR: &str = "BackgroundColor";
    /// `Rgba`: border color.
    pub const BORDER_COLOR: &str = "BorderColor";
    /// `f32`: border thickness.
    pub const BORDER_WIDTH: &str = "BorderWidth";
    /// `f32`: multiplied into the alpha of the widget and its descendants.
    pub const OPACITY: &str = "Opacity";
    /// `f32`: multiplied into the drawn size of the widget and its descendants.
    pub const SCALE: &str = "Scale";
    /// `DockType`: canvas edge the widget is docked to.
    pub const DOCK: &str = "Dock";
    /// `String`: event name published when the widget is clicked.
    pub const ON_CLICK: &str = "OnClick";
    /// `String`: text drawn by labels, buttons, and checkboxes.
    pub const TEXT: &str = "Text";
    /// `f32`: glyph cell height of the text.
    pub const FONT_SIZE: &str = "FontSize";
    /// `Rgba`: text color, also the checkbox mark color.
    pub const TEXT_COLOR: &str = "TextColor";
    /// `bool`: checkbox value.
    pub const CHECKED: &str = "Checked";
    /// `String`: path of the fill texture.
    pub const TEXTURE: &str = "Texture";
    /// `String`: path of the shader the widget is drawn with.
    pub const MATERIAL: &str = "Material";

    /// Properties whose change moves the widget's bounds.
    pub const AFFECTING_BOUNDS: [&str; 9] = [
        OFFSET, SIZE, MIN_SIZE, PADDING, MARGIN, BORDER_WIDTH, DOCK, TEXT, FONT_SIZE,
    ];

    /// Whether changing `name` requires a bounds recalculation.
    pub fn affects_bounds(name: &str) -> bool {
        AFFECTING_BOUNDS.contains(&name)
    }
}

/// One bag for all states plus an optional override bag per state.
#[derive(Debug, Clone, Default)]
pub struct StatefulProperties {
    all_states: NamedProperties,
    overrides: HashMap<WidgetState, NamedProperties>,
}

impl StatefulProperties {
    /// Creates empty layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` for every state.
    pub fn set<T: Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> PropertySetResult {
        self.all_states.set(name, value)
    }

    /// Sets `name` only while the widget is in `state`.
    pub fn set_for_state<T: Any + Send + Sync>(
        &mut self,
        state: WidgetState,
        name: impl Into<String>,
        value: T,
    ) -> PropertySetResult {
        self.overrides.entry(state).or_default().set(name, value)
    }

    /// Resolves `name` for `state`: the state's override wins when it defines
    /// the name, otherwise the all-states value is used.
    pub fn get<T: Any + Clone>(&self, name: &str, state: WidgetState) -> Result<T, PropertyGetError> {
        match self.overrides.get(&state) {
            Some(bag) if bag.contains(name) => bag.get(name),
            _ => self.all_states.get(name),
        }
    }

    /// The all-states layer.
    pub fn all_states(&self) -> &NamedProperties {
        &self.all_states
    }

    /// The override layer for `state`, if any was ever set.
    pub fn overrides_for(&self, state: WidgetState) -> Option<&NamedProperties> {
        self.overrides.get(&state)
    }
}
