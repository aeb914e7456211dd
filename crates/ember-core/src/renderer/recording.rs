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

use super::{MaterialHandle, Renderer2D, TextureHandle};
use crate::math::{Aabb2, Rgba, Vec2};

/// One call made against a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An orthographic projection was started.
    BeginOrtho {
        /// Lower-left corner of the projected area.
        bottom_left: Vec2,
        /// Upper-right corner of the projected area.
        top_right: Vec2,
    },
    /// The current orthographic projection ended.
    EndOrtho,
    /// A solid box.
    Aabb {
        /// Box in projection space.
        bounds: Aabb2,
        /// Fill color.
        color: Rgba,
        /// Material the box is drawn with.
        material: MaterialHandle,
    },
    /// A textured box.
    TexturedAabb {
        /// Box in projection space.
        bounds: Aabb2,
        /// Lower texture coordinate.
        uv_min: Vec2,
        /// Upper texture coordinate.
        uv_max: Vec2,
        /// The sampled texture.
        texture: TextureHandle,
        /// Tint color.
        color: Rgba,
        /// Material the box is drawn with.
        material: MaterialHandle,
    },
    /// A line of text.
    Text {
        /// Baseline origin.
        position: Vec2,
        /// The string drawn.
        text: String,
        /// Glyph scale.
        scale: f32,
        /// Text color.
        color: Rgba,
    },
}

/// A [`Renderer2D`] that stores every command instead of drawing it.
#[derive(Debug)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    default_texture: TextureHandle,
    default_material: MaterialHandle,
    ortho_depth: u32,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRenderer {
    /// Path reported by [`Renderer2D::default_texture`].
    pub const DEFAULT_TEXTURE_PATH: &'static str = "builtin://white";
    /// Path reported by [`Renderer2D::default_material`].
    pub const DEFAULT_MATERIAL_PATH: &'static str = "builtin://default";

    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            default_texture: TextureHandle::new(Self::DEFAULT_TEXTURE_PATH),
            default_material: MaterialHandle::new(Self::DEFAULT_MATERIAL_PATH),
            ortho_depth: 0,
        }
    }

    /// Every command recorded since the last [`RecordingRenderer::clear`].
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drops recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded draws (boxes and text), the unit the profiler counts
    /// as draw calls.
    pub fn draw_call_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::Aabb { .. }
                        | DrawCommand::TexturedAabb { .. }
                        | DrawCommand::Text { .. }
                )
            })
            .count()
    }

    /// Whether every `begin_ortho` has been matched by an `end_ortho`.
    pub fn is_balanced(&self) -> bool {
        self.ortho_depth == 0
    }
}

impl Renderer2D for RecordingRenderer {
    fn begin_ortho(&mut self, bottom_left: Vec2, top_right: Vec2) {
        self.ortho_depth += 1;
        self.commands.push(DrawCommand::BeginOrtho {
            bottom_left,
            top_right,
        });
    }

    fn end_ortho(&mut self) {
        if self.ortho_depth == 0 {
            log::warn!("end_ortho called without a matching begin_ortho.");
        }
        self.ortho_depth = self.ortho_depth.saturating_sub(1);
        self.commands.push(DrawCommand::EndOrtho);
    }

    fn draw_aabb(&mut self, bounds: Aabb2, color: Rgba, material: &MaterialHandle) {
        self.commands.push(DrawCommand::Aabb {
            bounds,
            color,
            material: material.clone(),
        });
    }

    fn draw_textured_aabb(
        &mut self,
        bounds: Aabb2,
        uv_min: Vec2,
        uv_max: Vec2,
        texture: &TextureHandle,
        color: Rgba,
        material: &MaterialHandle,
    ) {
        self.commands.push(DrawCommand::TexturedAabb {
            bounds,
            uv_min,
            uv_max,
            texture: texture.clone(),
            color,
            material: material.clone(),
        });
    }

    fn draw_text(&mut self, position: Vec2, text: &str, scale: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            scale,
            color,
        });
    }

    fn default_texture(&self) -> TextureHandle {
        self.default_texture.clone()
    }

    fn default_material(&self) -> MaterialHandle {
        self.default_material.clone()
    }
}
