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

//! Defines the drawing contract the engine core issues its 2D draw calls through.
//!
//! The core never owns GPU state. It talks to a [`Renderer2D`] implementation
//! handed in by the application and refers to textures and materials through
//! opaque, cheaply cloneable handles produced by a [`TextureProvider`].
//!
//! [`RecordingRenderer`] captures the issued commands instead of drawing them,
//! which makes it suitable for headless runs and tests.

mod recording;
mod traits;

use std::fmt;
use std::sync::Arc;

pub use self::recording::{DrawCommand, RecordingRenderer};
pub use self::traits::{PathTextureProvider, Renderer2D, TextureProvider};

/// An opaque, shared reference to a texture owned by the rendering backend.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(Arc<str>);

impl TextureHandle {
    /// Creates a handle identified by the texture's source path.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref()))
    }

    /// The path the texture was loaded from.
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureHandle({})", self.0)
    }
}

/// An opaque, shared reference to a material (shader program + state).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MaterialHandle(Arc<str>);

impl MaterialHandle {
    /// Creates a handle identified by the material's shader path.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref()))
    }

    /// The shader path the material was created from.
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MaterialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MaterialHandle({})", self.0)
    }
}
