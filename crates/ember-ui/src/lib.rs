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

//! # Ember UI
//!
//! A retained-mode widget tree for the engine core.
//!
//! Widgets live in a [`WidgetTree`] arena and carry their properties in a
//! [`StatefulProperties`] bag layered by [`WidgetState`]. Their world bounds
//! come from a fixed pipeline (see [`bounds`]). The [`UiSystem`] drives the
//! interaction state machine from an [`ember_core::input::InputSource`],
//! publishes [`UiEvent`]s on click, and issues draw calls through an
//! [`ember_core::renderer::Renderer2D`]. Trees are built in code or loaded
//! from XML descriptions (see [`description`]).

#![warn(missing_docs)]

pub mod bounds;
mod config;
pub mod description;
mod error;
mod event;
pub mod properties;
mod state;
mod system;
mod tree;
pub mod widget;

pub use bounds::{DockType, WidgetBounds};
pub use config::UiConfig;
pub use error::UiError;
pub use event::{UiEvent, WIDGET_NAME};
pub use properties::{names, StatefulProperties};
pub use state::WidgetState;
pub use system::UiSystem;
pub use tree::WidgetTree;
pub use widget::{Widget, WidgetId, WidgetKind};
