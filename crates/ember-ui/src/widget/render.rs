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

use ember_core::math::{Aabb2, Rgba, Vec2};
use ember_core::renderer::Renderer2D;

use super::{Widget, WidgetKind};
use crate::properties::names;

/// Opacity and placement accumulated from the root down to a widget.
///
/// Each `Scale` shrinks or grows its widget's whole subtree about the center
/// of that widget's borderless box. Nested scales compose into a single
/// mapping `p * scale + offset` from layout space to drawn space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct InheritedStyle {
    pub opacity: f32,
    pub scale: f32,
    pub offset: Vec2,
}

impl InheritedStyle {
    pub const ROOT: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    /// Folds the widget's own `Opacity` and `Scale` into the inherited values.
    pub fn apply(self, widget: &Widget) -> Self {
        let own_scale = widget.property::<f32>(names::SCALE);
        let pivot = widget.bounds().borderless.center();
        Self {
            opacity: self.opacity * widget.property::<f32>(names::OPACITY),
            scale: self.scale * own_scale,
            offset: self.offset + pivot * ((1.0 - own_scale) * self.scale),
        }
    }

    /// Where a layout-space point is drawn.
    pub fn map_point(&self, point: Vec2) -> Vec2 {
        point * self.scale + self.offset
    }

    /// Where a layout-space box is drawn.
    pub fn map_box(&self, bounds: Aabb2) -> Aabb2 {
        Aabb2::new(self.map_point(bounds.min), self.map_point(bounds.max))
    }
}

/// Issues the draw calls of one widget (not its children). `style` must
/// already include the widget's own opacity and scale. Returns the number of
/// draw calls made.
pub(crate) fn draw_widget(widget: &Widget, renderer: &mut dyn Renderer2D, style: InheritedStyle) -> u32 {
    let bounds = widget.bounds();
    let borderless = style.map_box(bounds.borderless);
    let bordered = style.map_box(bounds.bordered);
    let content = style.map_box(bounds.content);
    let material = widget
        .material()
        .cloned()
        .unwrap_or_else(|| renderer.default_material());
    let mut draws = 0;

    let border_width = widget.property::<f32>(names::BORDER_WIDTH);
    let border_color = widget.property::<Rgba>(names::BORDER_COLOR) * style.opacity;
    if border_width > 0.0 && border_color.a > 0.0 {
        renderer.draw_aabb(bordered, border_color, &material);
        draws += 1;
    }

    let background = widget.property::<Rgba>(names::BACKGROUND_COLOR) * style.opacity;
    if let Some(texture) = widget.texture() {
        renderer.draw_textured_aabb(borderless, Vec2::ZERO, Vec2::ONE, texture, background, &material);
        draws += 1;
    } else if background.a > 0.0 {
        renderer.draw_aabb(borderless, background, &material);
        draws += 1;
    }

    let text_color = widget.property::<Rgba>(names::TEXT_COLOR) * style.opacity;
    if widget.kind() == WidgetKind::Checkbox && widget.is_checked() {
        renderer.draw_aabb(content.scaled_about_center(0.5), text_color, &material);
        draws += 1;
    }

    let text = widget.property::<String>(names::TEXT);
    if !text.is_empty() {
        let font_size = widget.property::<f32>(names::FONT_SIZE) * style.scale;
        renderer.draw_text(content.min, &text, font_size, text_color);
        draws += 1;
    }

    draws
}
