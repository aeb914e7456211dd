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

use ember_core::NamedProperties;

use crate::properties::names;

/// Payload key holding the clicked widget's `Name`.
pub const WIDGET_NAME: &str = "WidgetName";

/// A click event, named after the widget's `OnClick` property.
#[derive(Debug, Clone)]
pub struct UiEvent {
    /// The configured event name.
    pub name: String,
    /// Extra data: always `WidgetName`, plus `Checked` for checkboxes.
    pub properties: NamedProperties,
}

impl UiEvent {
    /// Name of the widget that fired the event.
    pub fn widget_name(&self) -> Option<String> {
        self.properties.get(WIDGET_NAME).ok()
    }

    /// The checkbox value after the click, for checkbox events.
    pub fn checked(&self) -> Option<bool> {
        self.properties.get(names::CHECKED).ok()
    }
}
