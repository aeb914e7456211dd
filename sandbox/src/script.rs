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

//! Canned input for the headless frame loop.

use ember_core::input::{InputEvent, MouseButton};
use ember_core::math::Vec2;
use ember_ui::UiSystem;

/// Where the scripted cursor goes and what it does on a given frame.
enum Step {
    HoverWidget(&'static str),
    HoverPoint(Vec2),
    Press,
    Release,
    Key(&'static str),
}

const SCRIPT: [(u32, Step); 10] = [
    (1, Step::HoverWidget("Play")),
    (2, Step::Press),
    (3, Step::Release),
    (5, Step::HoverWidget("Sound")),
    (6, Step::Press),
    (7, Step::Release),
    (8, Step::HoverWidget("Quit")),
    (9, Step::HoverPoint(Vec2::new(10.0, 600.0))),
    (10, Step::Key("KeyU")),
    (11, Step::HoverWidget("Play")),
];

/// Window-space events for `frame`. Widget targets are resolved against the
/// current tree so the script follows the layout in the description.
pub fn events_for(frame: u32, ui: &UiSystem) -> Vec<InputEvent> {
    let to_window = |p: Vec2| InputEvent::MouseMoved {
        x: p.x,
        y: ui.config().virtual_canvas.y - p.y,
    };

    SCRIPT
        .iter()
        .filter(|(at, _)| *at == frame)
        .flat_map(|(_, step)| match step {
            Step::HoverWidget(name) => ui
                .find_widget(name)
                .and_then(|id| ui.widget(id))
                .map(|w| vec![to_window(w.bounds().bordered.center())])
                .unwrap_or_else(|| {
                    log::warn!("Script target '{name}' is not in the tree.");
                    Vec::new()
                }),
            Step::HoverPoint(point) => vec![to_window(*point)],
            Step::Press => vec![InputEvent::MouseButtonPressed {
                button: MouseButton::Left,
            }],
            Step::Release => vec![InputEvent::MouseButtonReleased {
                button: MouseButton::Left,
            }],
            Step::Key(code) => vec![
                InputEvent::KeyPressed {
                    key_code: code.to_string(),
                },
                InputEvent::KeyReleased {
                    key_code: code.to_string(),
                },
            ],
        })
        .collect()
}
