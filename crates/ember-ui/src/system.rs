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

//! The UI system: owns the widget tree, drives the interaction state machine
//! from input, publishes click events, and renders the tree.

use std::any::Any;
use std::path::Path;

use ember_core::input::InputSource;
use ember_core::math::Vec2;
use ember_core::renderer::{Renderer2D, TextureProvider};
use ember_core::{NamedProperties, PropertySetResult, Stopwatch};

use crate::config::UiConfig;
use crate::description::build_tree;
use crate::error::UiError;
use crate::event::{UiEvent, WIDGET_NAME};
use crate::properties::names;
use crate::state::WidgetState;
use crate::tree::WidgetTree;
use crate::widget::{draw_widget, InheritedStyle, Widget, WidgetId, WidgetKind};

/// Owns the widget tree and the single highlighted widget.
///
/// Collaborators are injected: click events go to the sender of an event bus
/// owned by the application, textures are resolved through a provider, and
/// input and rendering are passed to [`UiSystem::update`] and
/// [`UiSystem::render`] each frame.
pub struct UiSystem {
    config: UiConfig,
    tree: WidgetTree,
    highlighted: Option<WidgetId>,
    events: flume::Sender<UiEvent>,
    textures: Box<dyn TextureProvider>,
}

impl UiSystem {
    /// Creates a system with an empty tree.
    pub fn new(
        config: UiConfig,
        events: flume::Sender<UiEvent>,
        textures: Box<dyn TextureProvider>,
    ) -> Self {
        log::info!(
            "UI system created with a {}x{} virtual canvas.",
            config.virtual_canvas.x,
            config.virtual_canvas.y
        );
        Self {
            tree: WidgetTree::new(config.virtual_canvas),
            config,
            highlighted: None,
            events,
            textures,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Resolves a widget handle.
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.tree.get(id)
    }

    /// The widget currently under the cursor, if any.
    pub fn highlighted(&self) -> Option<WidgetId> {
        self.highlighted
    }

    /// Replaces the tree with one built from `text`. On error the current
    /// tree is kept untouched.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), UiError> {
        let tree = build_tree(text, self.config.virtual_canvas, self.textures.as_mut())?;
        self.tree = tree;
        self.highlighted = None;
        Ok(())
    }

    /// Replaces the tree with one built from the file at `path`.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), UiError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| UiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from_str(&text)
    }

    /// Tears the tree down and rebuilds it from the configured description.
    pub fn reload(&mut self) -> Result<(), UiError> {
        let stopwatch = Stopwatch::new();
        let path = self.config.description_path.clone();
        self.load_from_file(&path)?;
        log::info!(
            "Reloaded UI from '{}': {} widgets in {:.2} ms.",
            path.display(),
            self.tree.len(),
            stopwatch.elapsed_ms_f64()
        );
        Ok(())
    }

    /// Removes every widget.
    pub fn teardown(&mut self) {
        self.highlighted = None;
        self.tree.clear();
        log::debug!("UI torn down.");
    }

    /// Creates a detached widget of `kind` with default properties.
    pub fn create_widget(kind: WidgetKind) -> Widget {
        Widget::new(kind)
    }

    /// Creates a detached widget from a description tag.
    pub fn create_widget_from_tag(tag: &str) -> Result<Widget, UiError> {
        WidgetKind::from_tag(tag)
            .map(Widget::new)
            .ok_or_else(|| UiError::UnknownWidgetTag {
                tag: tag.to_string(),
                position: "<code>".to_string(),
            })
    }

    /// Adds a top-level widget above the existing ones.
    pub fn add_widget(&mut self, widget: Widget) -> WidgetId {
        self.tree.add_root(widget)
    }

    /// Adds `widget` as the topmost child of `parent`.
    pub fn add_child(&mut self, parent: WidgetId, widget: Widget) -> Result<WidgetId, UiError> {
        self.tree.add_child(parent, widget)
    }

    /// Removes `id` and its subtree, clearing the highlight first if it
    /// points into that subtree.
    pub fn remove_widget(&mut self, id: WidgetId) -> Result<usize, UiError> {
        if self
            .highlighted
            .is_some_and(|h| self.tree.is_within(h, id))
        {
            self.highlighted = None;
        }
        self.tree.remove(id)
    }

    /// Sets a property for all states, re-running layout when needed.
    pub fn set_property<T: Any + Send + Sync>(
        &mut self,
        id: WidgetId,
        name: &str,
        value: T,
    ) -> Result<PropertySetResult, UiError> {
        self.tree.set_property(id, name, value, None)
    }

    /// Sets a property that applies only while the widget is in `state`.
    pub fn set_state_property<T: Any + Send + Sync>(
        &mut self,
        id: WidgetId,
        state: WidgetState,
        name: &str,
        value: T,
    ) -> Result<PropertySetResult, UiError> {
        self.tree.set_property(id, name, value, Some(state))
    }

    /// Loads `path` through the texture provider and uses it as the fill.
    pub fn set_widget_texture(&mut self, id: WidgetId, path: &str) -> Result<(), UiError> {
        let texture = self.textures.texture(path);
        let widget = self.tree.widget_mut(id).ok_or(UiError::UnknownWidget(id))?;
        let _ = widget.set_property(names::TEXTURE, path.to_string());
        widget.set_texture(Some(texture));
        Ok(())
    }

    /// Finds a widget by `Name` across all roots.
    pub fn find_widget(&self, name: &str) -> Option<WidgetId> {
        self.tree.find_by_name(name)
    }

    /// Hides or shows the named widget and its subtree. Returns whether a
    /// widget with that name exists.
    pub fn set_widget_visibility(&mut self, name: &str, hidden: bool) -> bool {
        let Some(id) = self.tree.find_by_name(name) else {
            log::warn!("No widget named '{name}' to change visibility of.");
            return false;
        };
        self.tree.set_hidden(id, hidden).is_ok()
    }

    /// Disables or re-enables the named widget. Returns whether it exists.
    pub fn set_widget_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let Some(id) = self.tree.find_by_name(name) else {
            log::warn!("No widget named '{name}' to enable or disable.");
            return false;
        };
        self.tree.set_disabled(id, !enabled).is_ok()
    }

    /// Converts a window position (origin top-left) to canvas coordinates
    /// (origin bottom-left).
    pub fn screen_to_virtual(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x, self.config.virtual_canvas.y - point.y)
    }

    fn is_clickable(&self, id: WidgetId) -> bool {
        self.tree.get(id).is_some_and(Widget::is_clickable)
    }

    fn transition(&mut self, id: WidgetId, state: WidgetState) {
        if let Err(e) = self.tree.set_state(id, state) {
            log::warn!("Widget state change to {state} failed: {e}");
        }
    }

    /// Runs one frame of interaction: the reload hotkey, highlight tracking,
    /// pressing, and clicking.
    pub fn update(&mut self, input: &dyn InputSource) {
        if input.was_key_just_pressed(&self.config.reload_key) {
            if let Err(e) = self.reload() {
                log::error!("UI reload failed, keeping the current tree: {e}");
            }
        }

        if self.highlighted.is_some_and(|h| !self.tree.contains(h)) {
            log::warn!("Highlighted widget vanished from the tree.");
            self.highlighted = None;
        }

        let cursor = self.screen_to_virtual(input.cursor_position());
        let hit = self.tree.hit_test(cursor);
        if hit != self.highlighted {
            if let Some(old) = self.highlighted.filter(|id| self.is_clickable(*id)) {
                self.transition(old, WidgetState::Active);
            }
            if let Some(new) = hit.filter(|id| self.is_clickable(*id)) {
                self.transition(new, WidgetState::Highlighted);
            }
            self.highlighted = hit;
        }

        let Some(target) = self.highlighted.filter(|id| self.is_clickable(*id)) else {
            return;
        };
        let button = self.config.primary_button;
        if input.was_mouse_button_just_released(button) {
            self.click(target);
            self.transition(target, WidgetState::Highlighted);
        } else if input.is_mouse_button_down(button) {
            self.transition(target, WidgetState::Pressed);
        }
    }

    fn click(&mut self, id: WidgetId) {
        let Some(widget) = self.tree.widget_mut(id) else {
            return;
        };
        let kind = widget.kind();
        kind.on_click(widget);

        let Some(event_name) = widget
            .optional_property::<String>(names::ON_CLICK)
            .filter(|n| !n.is_empty())
        else {
            return;
        };
        let mut properties = NamedProperties::new();
        let _ = properties.set(WIDGET_NAME, widget.name());
        if kind == WidgetKind::Checkbox {
            let _ = properties.set(names::CHECKED, widget.is_checked());
        }

        log::debug!("Widget '{}' fired '{event_name}'.", widget.name());
        if let Err(e) = self.events.send(UiEvent {
            name: event_name,
            properties,
        }) {
            log::error!("Failed to publish UI event: {e}. Receiver likely disconnected.");
        }
    }

    /// Draws every visible widget inside an orthographic pass over the
    /// canvas. Returns the number of draw calls.
    pub fn render(&self, renderer: &mut dyn Renderer2D) -> u32 {
        renderer.begin_ortho(Vec2::ZERO, self.config.virtual_canvas);
        let draws = self
            .tree
            .roots()
            .iter()
            .map(|root| self.render_subtree(*root, renderer, InheritedStyle::ROOT))
            .sum();
        renderer.end_ortho();
        draws
    }

    fn render_subtree(
        &self,
        id: WidgetId,
        renderer: &mut dyn Renderer2D,
        inherited: InheritedStyle,
    ) -> u32 {
        let Some(widget) = self.tree.get(id) else {
            return 0;
        };
        if widget.state() == WidgetState::Hidden {
            return 0;
        }
        let style = inherited.apply(widget);
        let own = draw_widget(widget, renderer, style);
        own + widget
            .children()
            .iter()
            .map(|child| self.render_subtree(*child, renderer, style))
            .sum::<u32>()
    }
}
