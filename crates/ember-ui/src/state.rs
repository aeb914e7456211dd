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

//! Interaction states of a widget.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a widget stands in its interaction state machine.
///
/// `Active` is the resting state. The UI system moves clickable widgets between
/// `Active`, `Highlighted`, and `Pressed` as the cursor moves and clicks.
/// `Disabled` and `Hidden` are only entered and left through explicit calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetState {
    /// Idle and interactive.
    #[default]
    Active,
    /// Under the cursor.
    Highlighted,
    /// Under the cursor with the primary button held.
    Pressed,
    /// Rendered but not interactive.
    Disabled,
    /// Neither rendered nor hit-tested, nor are its descendants.
    Hidden,
}

impl WidgetState {
    /// All states, in declaration order.
    pub const ALL: [WidgetState; 5] = [
        WidgetState::Active,
        WidgetState::Highlighted,
        WidgetState::Pressed,
        WidgetState::Disabled,
        WidgetState::Hidden,
    ];

    /// Maps a description element name (`"Highlighted"`, ...) to a state.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }

    /// The description element name of the state.
    pub fn tag(self) -> &'static str {
        match self {
            WidgetState::Active => "Active",
            WidgetState::Highlighted => "Highlighted",
            WidgetState::Pressed => "Pressed",
            WidgetState::Disabled => "Disabled",
            WidgetState::Hidden => "Hidden",
        }
    }

    /// Whether a widget in this state may be highlighted, pressed, and clicked.
    pub fn is_interactive(self) -> bool {
        !matches!(self, WidgetState::Disabled | WidgetState::Hidden)
    }
}

impl fmt::Display for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
