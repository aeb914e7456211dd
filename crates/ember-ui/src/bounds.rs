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

//! The bounds pipeline that turns a widget's content box into its world bounds.
//!
//! Stages run in a fixed order:
//! content -> minimum-size stretch -> docking -> padding (snapshot: borderless)
//! -> border (snapshot: bordered) -> margin (final).

use ember_core::math::{Aabb2, Vec2};
use serde::{Deserialize, Serialize};

/// Canvas edge a widget attaches to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DockType {
    /// Positioned by its offsets only.
    #[default]
    None,
    /// Pinned to the left edge, full canvas height, own width kept.
    Left,
    /// Pinned to the right edge, full canvas height, own width kept.
    Right,
    /// Pinned to the top edge, full canvas width, own height kept.
    Top,
    /// Pinned to the bottom edge, full canvas width, own height kept.
    Bottom,
    /// Covers the whole canvas.
    Fill,
}

impl DockType {
    /// Parses a dock keyword, ignoring ASCII case.
    pub fn parse(keyword: &str) -> Option<Self> {
        const KEYWORDS: [(&str, DockType); 6] = [
            ("none", DockType::None),
            ("left", DockType::Left),
            ("right", DockType::Right),
            ("top", DockType::Top),
            ("bottom", DockType::Bottom),
            ("fill", DockType::Fill),
        ];
        let keyword = keyword.trim();
        KEYWORDS
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(keyword))
            .map(|(_, dock)| *dock)
    }

    /// Overrides the edges of `bounds` this dock pins to the canvas `[0, canvas]`.
    pub fn apply(self, bounds: Aabb2, canvas: Vec2) -> Aabb2 {
        let size = bounds.size();
        match self {
            DockType::None => bounds,
            DockType::Left => Aabb2::new(Vec2::new(0.0, 0.0), Vec2::new(size.x, canvas.y)),
            DockType::Right => {
                Aabb2::new(Vec2::new(canvas.x - size.x, 0.0), Vec2::new(canvas.x, canvas.y))
            }
            DockType::Bottom => Aabb2::new(Vec2::new(0.0, 0.0), Vec2::new(canvas.x, size.y)),
            DockType::Top => {
                Aabb2::new(Vec2::new(0.0, canvas.y - size.y), Vec2::new(canvas.x, canvas.y))
            }
            DockType::Fill => Aabb2::new(Vec2::ZERO, canvas),
        }
    }
}

/// Everything the pipeline needs besides the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsInputs {
    /// World-space box of the content (children, or own size).
    pub content: Aabb2,
    /// Minimum size to stretch the content to.
    pub min_size: Vec2,
    /// Canvas docking.
    pub dock: DockType,
    /// Grows the box before the border.
    pub padding: Vec2,
    /// Border thickness.
    pub border_width: f32,
    /// Grows the box after the border.
    pub margin: Vec2,
}

/// The boxes a widget keeps after layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WidgetBounds {
    /// Content after stretching and docking, before padding.
    pub content: Aabb2,
    /// Content plus padding: the fill area.
    pub borderless: Aabb2,
    /// Borderless plus border: the visible and clickable area.
    pub bordered: Aabb2,
    /// Bordered plus margin: what the parent lays out around.
    pub final_bounds: Aabb2,
}

/// Grows `content` symmetrically about its center until it is at least
/// `min_size` on each axis. Axes already large enough are left untouched,
/// and so is everything when `min_size` is zero or negative.
pub fn stretch_to_min_size(content: Aabb2, min_size: Vec2) -> Aabb2 {
    let mut stretched = content;
    let missing_x = min_size.x - content.width();
    if missing_x > 0.0 {
        stretched.min.x -= missing_x * 0.5;
        stretched.max.x += missing_x * 0.5;
    }
    let missing_y = min_size.y - content.height();
    if missing_y > 0.0 {
        stretched.min.y -= missing_y * 0.5;
        stretched.max.y += missing_y * 0.5;
    }
    stretched
}

/// Runs the full pipeline.
pub fn compute_bounds(inputs: &BoundsInputs, canvas: Vec2) -> WidgetBounds {
    let stretched = stretch_to_min_size(inputs.content, inputs.min_size);
    let content = inputs.dock.apply(stretched, canvas);
    let borderless = content.expanded(inputs.padding);
    let bordered = borderless.expanded(Vec2::splat(inputs.border_width));
    let final_bounds = bordered.expanded(inputs.margin);
    WidgetBounds {
        content,
        borderless,
        bordered,
        final_bounds,
    }
}
