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

use std::path::PathBuf;

use ember_core::input::MouseButton;
use ember_core::math::Vec2;
use serde::{Deserialize, Serialize};

/// Settings of the [`crate::UiSystem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Size of the virtual canvas widgets are laid out on. Docking resolves
    /// against it and cursor positions are flipped by its height.
    pub virtual_canvas: Vec2,
    /// Description loaded by [`crate::UiSystem::reload`].
    pub description_path: PathBuf,
    /// Key code that triggers a reload.
    pub reload_key: String,
    /// Button that presses and clicks widgets.
    pub primary_button: MouseButton,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            virtual_canvas: Vec2::new(1600.0, 900.0),
            description_path: PathBuf::from("ui/widgets.xml"),
            reload_key: "KeyU".to_string(),
            primary_button: MouseButton::Left,
        }
    }
}
