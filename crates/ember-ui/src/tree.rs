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

//! The widget tree: a generational arena of widgets plus the list of roots.

use std::any::Any;

use ember_core::math::{Aabb2, Vec2};
use ember_core::PropertySetResult;

use crate::bounds::{compute_bounds, BoundsInputs, DockType};
use crate::error::UiError;
use crate::properties::names;
use crate::state::WidgetState;
use crate::widget::{Widget, WidgetId};

struct Slot {
    generation: u32,
    widget: Option<Widget>,
}

/// Owns every widget. Parents own their children: removing a widget removes
/// its whole subtree. Roots are painted in list order, so the last root is on
/// top; the same holds for children.
pub struct WidgetTree {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    roots: Vec<WidgetId>,
    canvas: Vec2,
}

impl WidgetTree {
    /// Creates an empty tree laid out against a virtual canvas of `canvas` units.
    pub fn new(canvas: Vec2) -> Self {
        Self {
            slots: Vec::new(),
            free_slots: Vec::new(),
            roots: Vec::new(),
            canvas,
        }
    }

    /// The virtual canvas docking is resolved against.
    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_slots.len()
    }

    /// Whether the tree holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-level widgets in paint order.
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// Resolves a handle.
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.widget.as_ref())
    }

    fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.widget.as_mut())
    }

    fn require(&self, id: WidgetId) -> Result<&Widget, UiError> {
        self.get(id).ok_or(UiError::UnknownWidget(id))
    }

    /// Whether `id` refers to a live widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    fn insert(&mut self, widget: Widget) -> WidgetId {
        if let Some(index) = self.free_slots.pop() {
            let slot = &mut self.slots[index as usize];
            slot.widget = Some(widget);
            WidgetId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                widget: Some(widget),
            });
            WidgetId {
                index,
                generation: 0,
            }
        }
    }

    /// Adds a top-level widget, drawn above the existing roots.
    pub fn add_root(&mut self, mut widget: Widget) -> WidgetId {
        widget.parent = None;
        widget.children.clear();
        let id = self.insert(widget);
        self.roots.push(id);
        self.refresh_bounds(id);
        id
    }

    /// Adds `widget` as the last (topmost) child of `parent`.
    pub fn add_child(&mut self, parent: WidgetId, mut widget: Widget) -> Result<WidgetId, UiError> {
        self.require(parent)?;
        widget.parent = Some(parent);
        widget.children.clear();
        let id = self.insert(widget);
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        self.refresh_bounds(id);
        Ok(id)
    }

    /// Removes `id` and its subtree. Returns how many widgets were removed.
    pub fn remove(&mut self, id: WidgetId) -> Result<usize, UiError> {
        let parent = self.require(id)?.parent;

        let siblings = match parent {
            Some(p) => self.get_mut(p).map(|w| &mut w.children),
            None => Some(&mut self.roots),
        };
        match siblings.and_then(|list| {
            let position = list.iter().position(|c| *c == id)?;
            Some(list.remove(position))
        }) {
            Some(_) => {}
            None => log::warn!("Widget {id:?} was not found in its parent's child list."),
        }

        let subtree = self.subtree(id);
        for widget_id in &subtree {
            let slot = &mut self.slots[widget_id.index as usize];
            slot.widget = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free_slots.push(widget_id.index);
        }

        if let Some(p) = parent {
            self.refresh_upward(p);
        }
        Ok(subtree.len())
    }

    /// Removes every widget.
    pub fn clear(&mut self) {
        let roots = std::mem::take(&mut self.roots);
        for root in roots {
            for id in self.subtree(root) {
                let slot = &mut self.slots[id.index as usize];
                slot.widget = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_slots.push(id.index);
            }
        }
    }

    /// `id` and all its descendants, parents before children.
    pub fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(widget) = self.get(current) {
                out.push(current);
                stack.extend(widget.children.iter().rev().copied());
            }
        }
        out
    }

    /// Whether `id` is `ancestor` or lies below it.
    pub fn is_within(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.get(current).and_then(|w| w.parent);
        }
        false
    }

    /// Sum of the offsets of `id` and its ancestors.
    pub fn world_origin(&self, id: WidgetId) -> Vec2 {
        let mut origin = Vec2::ZERO;
        let mut cursor = self.get(id);
        while let Some(widget) = cursor {
            origin += widget.property::<Vec2>(names::OFFSET);
            cursor = widget.parent.and_then(|p| self.get(p));
        }
        origin
    }

    /// Smallest box around the final bounds of the children, seeded from the
    /// first child. `None` for a childless widget.
    pub fn bounds_around_children(&self, id: WidgetId) -> Option<Aabb2> {
        let widget = self.get(id)?;
        Aabb2::enclosing(
            widget
                .children
                .iter()
                .filter_map(|c| self.get(*c))
                .map(|c| c.bounds.final_bounds),
        )
    }

    fn layout(&mut self, id: WidgetId) {
        let Some(widget) = self.get(id) else {
            return;
        };
        let content = self.bounds_around_children(id).unwrap_or_else(|| {
            Aabb2::from_min_size(self.world_origin(id), widget.kind.leaf_size(widget))
        });
        let inputs = BoundsInputs {
            content,
            min_size: widget
                .optional_property::<Vec2>(names::MIN_SIZE)
                .unwrap_or(Vec2::ZERO),
            dock: widget
                .optional_property::<DockType>(names::DOCK)
                .unwrap_or_default(),
            padding: widget.property::<Vec2>(names::PADDING),
            border_width: widget.property::<f32>(names::BORDER_WIDTH),
            margin: widget.property::<Vec2>(names::MARGIN),
        };
        let bounds = compute_bounds(&inputs, self.canvas);
        if let Some(widget) = self.get_mut(id) {
            widget.bounds = bounds;
        }
    }

    /// Re-runs layout for the subtree of `id` (children first), then for each
    /// ancestor up to the root.
    pub fn refresh_bounds(&mut self, id: WidgetId) {
        for widget_id in self.subtree(id).into_iter().rev() {
            self.layout(widget_id);
        }
        if let Some(parent) = self.get(id).and_then(|w| w.parent) {
            self.refresh_upward(parent);
        }
    }

    fn refresh_upward(&mut self, from: WidgetId) {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            self.layout(id);
            cursor = self.get(id).and_then(|w| w.parent);
        }
    }

    /// Sets a property on a widget, for all states or for one state, and
    /// re-runs layout if the property moves the widget.
    pub fn set_property<T: Any + Send + Sync>(
        &mut self,
        id: WidgetId,
        name: &str,
        value: T,
        state: Option<WidgetState>,
    ) -> Result<PropertySetResult, UiError> {
        let widget = self.get_mut(id).ok_or(UiError::UnknownWidget(id))?;
        let result = match state {
            Some(state) => widget.set_state_property(state, name, value),
            None => widget.set_property(name, value),
        };
        if names::affects_bounds(name) {
            self.refresh_bounds(id);
        }
        Ok(result)
    }

    /// Moves a single widget to `state`.
    pub fn set_state(&mut self, id: WidgetId, state: WidgetState) -> Result<(), UiError> {
        let widget = self.get_mut(id).ok_or(UiError::UnknownWidget(id))?;
        let old = widget.state;
        if old == state {
            return Ok(());
        }
        widget.set_state(state);
        let moves_bounds = [old, state].iter().any(|s| {
            widget
                .properties
                .overrides_for(*s)
                .is_some_and(|bag| bag.names().any(names::affects_bounds))
        });
        if moves_bounds {
            self.refresh_bounds(id);
        }
        Ok(())
    }

    /// Hides `id` and every descendant, or makes them all `Active` again.
    pub fn set_hidden(&mut self, id: WidgetId, hidden: bool) -> Result<(), UiError> {
        self.require(id)?;
        let state = if hidden {
            WidgetState::Hidden
        } else {
            WidgetState::Active
        };
        for widget_id in self.subtree(id) {
            self.set_state(widget_id, state)?;
        }
        Ok(())
    }

    /// Disables or re-enables a single widget.
    pub fn set_disabled(&mut self, id: WidgetId, disabled: bool) -> Result<(), UiError> {
        let state = if disabled {
            WidgetState::Disabled
        } else {
            WidgetState::Active
        };
        self.set_state(id, state)
    }

    /// Whether `id` or any ancestor is hidden.
    pub fn is_effectively_hidden(&self, id: WidgetId) -> bool {
        let mut cursor = self.get(id);
        while let Some(widget) = cursor {
            if widget.state == WidgetState::Hidden {
                return true;
            }
            cursor = widget.parent.and_then(|p| self.get(p));
        }
        false
    }

    /// Finds the topmost visible widget whose bordered bounds contain `point`.
    ///
    /// Later roots and later children are drawn on top, so they are tried
    /// first; a child that contains the point wins over its parent.
    pub fn hit_test(&self, point: Vec2) -> Option<WidgetId> {
        self.roots
            .iter()
            .rev()
            .find_map(|root| self.hit_test_from(*root, point))
    }

    fn hit_test_from(&self, id: WidgetId, point: Vec2) -> Option<WidgetId> {
        let widget = self.get(id)?;
        if widget.state == WidgetState::Hidden {
            return None;
        }
        widget
            .children
            .iter()
            .rev()
            .find_map(|child| self.hit_test_from(*child, point))
            .or_else(|| {
                widget
                    .bounds
                    .bordered
                    .is_point_on_or_inside(point)
                    .then_some(id)
            })
    }

    /// First widget, depth-first in paint order, whose `Name` is `name`.
    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.roots
            .iter()
            .flat_map(|root| self.subtree(*root))
            .find(|id| {
                self.get(*id)
                    .and_then(|w| w.try_property::<String>(names::NAME).ok())
                    .is_some_and(|n| n == name)
            })
    }

    pub(crate) fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.get_mut(id)
    }
}
