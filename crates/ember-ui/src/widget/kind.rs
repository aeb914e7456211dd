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

//! The closed set of widget variants and their per-variant behavior.

use ember_core::math::{Rgba, Vec2};
use serde::{Deserialize, Serialize};

use super::Widget;
use crate::bounds::DockType;
use crate::properties::{names, StatefulProperties};

/// Width of one glyph cell relative to the font size.
pub const GLYPH_ASPECT: f32 = 0.5;

/// Default glyph cell height.
pub const DEFAULT_FONT_SIZE: f32 = 24.0;

/// Which widget a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    /// Text only; sized by its text.
    Label,
    /// A clickable box with optional text.
    Button,
    /// A container sized by its children.
    Window,
    /// A button that toggles its `Checked` property on click.
    Checkbox,
}

impl WidgetKind {
    /// All variants.
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Label,
        WidgetKind::Button,
        WidgetKind::Window,
        WidgetKind::Checkbox,
    ];

    /// Maps a description tag to a variant.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    /// The description tag of the variant.
    pub fn tag(self) -> &'static str {
        match self {
            WidgetKind::Label => "Label",
            WidgetKind::Button => "Button",
            WidgetKind::Window => "Window",
            WidgetKind::Checkbox => "Checkbox",
        }
    }

    pub(crate) fn default_properties(self) -> StatefulProperties {
        let mut props = StatefulProperties::new();
        let _ = props.set(names::NAME, "Unnamed Widget".to_string());
        let _ = props.set(names::OFFSET, Vec2::ZERO);
        let _ = props.set(names::SIZE, Vec2::ONE);
        let _ = props.set(names::MIN_SIZE, Vec2::ZERO);
        let _ = props.set(names::PADDING, Vec2::ZERO);
        let _ = props.set(names::MARGIN, Vec2::ZERO);
        let _ = props.set(names::BACKGROUND_COLOR, Rgba::WHITE);
        let _ = props.set(names::BORDER_COLOR, Rgba::WHITE);
        let _ = props.set(names::BORDER_WIDTH, 0.0f32);
        let _ = props.set(names::OPACITY, 1.0f32);
        let _ = props.set(names::SCALE, 1.0f32);
        let _ = props.set(names::DOCK, DockType::None);
        let _ = props.set(names::TEXT, String::new());
        let _ = props.set(names::FONT_SIZE, DEFAULT_FONT_SIZE);
        let _ = props.set(names::TEXT_COLOR, Rgba::BLACK);

        match self {
            WidgetKind::Label => {
                let _ = props.set(names::BACKGROUND_COLOR, Rgba::TRANSPARENT);
                let _ = props.set(names::BORDER_COLOR, Rgba::TRANSPARENT);
            }
            WidgetKind::Checkbox => {
                let _ = props.set(names::CHECKED, false);
                let _ = props.set(names::SIZE, Vec2::splat(DEFAULT_FONT_SIZE));
            }
            WidgetKind::Button | WidgetKind::Window => {}
        }
        props
    }

    /// Extent of a widget of this kind when it has no children.
    pub(crate) fn leaf_size(self, widget: &Widget) -> Vec2 {
        let size = widget.property::<Vec2>(names::SIZE);
        match self {
            WidgetKind::Window => size,
            WidgetKind::Label => text_extent(widget),
            WidgetKind::Button | WidgetKind::Checkbox => size.max(text_extent(widget)),
        }
    }

    /// Applies the variant's own reaction to a click.
    pub(crate) fn on_click(self, widget: &mut Widget) {
        if self == WidgetKind::Checkbox {
            let checked = !widget.property::<bool>(names::CHECKED);
            let _ = widget.set_property(names::CHECKED, checked);
        }
    }
}

/// Extent of the widget's text in glyph cells.
pub(crate) fn text_extent(widget: &Widget) -> Vec2 {
    let text = widget.property::<String>(names::TEXT);
    if text.is_empty() {
        return Vec2::ZERO;
    }
    let font_size = widget.property::<f32>(names::FONT_SIZE);
    Vec2::new(
        text.chars().count() as f32 * font_size * GLYPH_ASPECT,
        font_size,
    )
}
