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

use std::collections::HashMap;

use super::{MaterialHandle, TextureHandle};
use crate::math::{Aabb2, Rgba, Vec2};

/// The immediate-mode 2D drawing contract consumed by the UI and debug overlays.
///
/// Implementations translate these calls into backend work; the caller keeps
/// no state between frames beyond what it passes in.
pub trait Renderer2D {
    /// Begins an orthographic projection spanning `bottom_left` to `top_right`.
    /// Every draw until the matching [`Renderer2D::end_ortho`] uses that space.
    fn begin_ortho(&mut self, bottom_left: Vec2, top_right: Vec2);

    /// Ends the projection started by [`Renderer2D::begin_ortho`].
    fn end_ortho(&mut self);

    /// Draws a solid box with `material`.
    fn draw_aabb(&mut self, bounds: Aabb2, color: Rgba, material: &MaterialHandle);

    /// Draws a textured box with `material`, sampling `texture` between
    /// `uv_min` and `uv_max`.
    fn draw_textured_aabb(
        &mut self,
        bounds: Aabb2,
        uv_min: Vec2,
        uv_max: Vec2,
        texture: &TextureHandle,
        color: Rgba,
        material: &MaterialHandle,
    );

    /// Draws a line of text with its baseline starting at `position`.
    fn draw_text(&mut self, position: Vec2, text: &str, scale: f32, color: Rgba);

    /// The texture used when a widget does not name one.
    fn default_texture(&self) -> TextureHandle;

    /// The material used when a widget does not name one.
    fn default_material(&self) -> MaterialHandle;
}

/// Resolves texture and material paths into shared handles.
pub trait TextureProvider {
    /// Returns the handle for the texture at `path`, loading it if needed.
    fn texture(&mut self, path: &str) -> TextureHandle;

    /// Returns the handle for the material built from the shader at `path`.
    fn material(&mut self, path: &str) -> MaterialHandle;
}

/// A [`TextureProvider`] that interns handles by path without touching the disk.
#[derive(Debug, Default)]
pub struct PathTextureProvider {
    textures: HashMap<String, TextureHandle>,
    materials: HashMap<String, MaterialHandle>,
}

impl PathTextureProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct textures handed out so far.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl TextureProvider for PathTextureProvider {
    fn texture(&mut self, path: &str) -> TextureHandle {
        self.textures
            .entry(path.to_string())
            .or_insert_with(|| {
                log::debug!("Registering texture '{path}'.");
                TextureHandle::new(path)
            })
            .clone()
    }

    fn material(&mut self, path: &str) -> MaterialHandle {
        self.materials
            .entry(path.to_string())
            .or_insert_with(|| MaterialHandle::new(path))
            .clone()
    }
}
