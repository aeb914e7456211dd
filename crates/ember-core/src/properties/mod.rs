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

//! A named, dynamically typed property bag.
//!
//! [`NamedProperties`] maps string keys to values of any `'static` type. Each
//! value remembers the type it was stored as; fetching it under a different
//! type is an error, never a coercion.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Why a [`NamedProperties::get`] did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyGetError {
    /// The bag holds no properties at all.
    #[error("property bag is empty")]
    NoProperties,
    /// No property with the requested name exists.
    #[error("no property named '{0}'")]
    NotFound(String),
    /// The property exists but was stored under another type.
    #[error("property '{name}' is a {stored}, not a {requested}")]
    WrongType {
        /// The property name.
        name: String,
        /// Type name the value was stored as.
        stored: &'static str,
        /// Type name that was requested.
        requested: &'static str,
    },
}

/// The outcome of a [`NamedProperties::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PropertySetResult {
    /// A new property was created.
    Inserted,
    /// An existing property of the same type was overwritten.
    Replaced,
    /// An existing property was overwritten with a value of a different type.
    ReplacedWithNewType,
    /// The bag forbids type changes and the existing property had another type.
    RejectedTypeChange,
}

#[derive(Clone)]
struct Slot {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Slot {
    fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    fn type_id(&self) -> TypeId {
        (*self.value).type_id()
    }
}

/// A string-keyed map of type-erased values.
///
/// Cloning is cheap: stored values are reference counted and never mutated in
/// place, a `set` always replaces the slot.
#[derive(Clone, Default)]
pub struct NamedProperties {
    slots: HashMap<String, Slot>,
    never_change_type: bool,
}

impl NamedProperties {
    /// Creates an empty bag that allows a property to change type on `set`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty bag that rejects `set` calls changing a property's type.
    pub fn with_fixed_types() -> Self {
        Self {
            slots: HashMap::new(),
            never_change_type: true,
        }
    }

    /// Stores `value` under `name`.
    pub fn set<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) -> PropertySetResult {
        let name = name.into();
        match self.slots.get(&name) {
            None => {
                self.slots.insert(name, Slot::new(value));
                PropertySetResult::Inserted
            }
            Some(existing) if existing.type_id() == TypeId::of::<T>() => {
                self.slots.insert(name, Slot::new(value));
                PropertySetResult::Replaced
            }
            Some(_) if self.never_change_type => PropertySetResult::RejectedTypeChange,
            Some(_) => {
                self.slots.insert(name, Slot::new(value));
                PropertySetResult::ReplacedWithNewType
            }
        }
    }

    /// Fetches a copy of the property `name` stored as `T`.
    pub fn get<T: Any + Clone>(&self, name: &str) -> Result<T, PropertyGetError> {
        self.get_ref::<T>(name).cloned()
    }

    /// Borrows the property `name` stored as `T`.
    pub fn get_ref<T: Any>(&self, name: &str) -> Result<&T, PropertyGetError> {
        if self.slots.is_empty() {
            return Err(PropertyGetError::NoProperties);
        }
        let slot = self
            .slots
            .get(name)
            .ok_or_else(|| PropertyGetError::NotFound(name.to_string()))?;
        slot.value
            .downcast_ref::<T>()
            .ok_or_else(|| PropertyGetError::WrongType {
                name: name.to_string(),
                stored: slot.type_name,
                requested: std::any::type_name::<T>(),
            })
    }

    /// Whether a property named `name` exists, regardless of its type.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Removes the property `name`, returning whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.slots.remove(name).is_some()
    }

    /// Number of stored properties.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates property names in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}

impl fmt::Debug for NamedProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.slots.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_map()
            .entries(names.into_iter().map(|(k, v)| (k, v.type_name)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bag_reports_no_properties() {
        let bag = NamedProperties::new();
        assert_eq!(bag.get::<f32>("Opacity"), Err(PropertyGetError::NoProperties));
    }

    #[test]
    fn missing_name_reports_not_found() {
        let mut bag = NamedProperties::new();
        assert_eq!(bag.set("Opacity", 1.0f32), PropertySetResult::Inserted);
        assert_eq!(
            bag.get::<f32>("BorderWidth"),
            Err(PropertyGetError::NotFound("BorderWidth".to_string()))
        );
    }

    #[test]
    fn fetch_under_other_type_is_wrong_type() {
        let mut bag = NamedProperties::new();
        let _ = bag.set("Opacity", 1.0f32);
        assert!(matches!(
            bag.get::<f64>("Opacity"),
            Err(PropertyGetError::WrongType { ref name, .. }) if name == "Opacity"
        ));
    }

    #[test]
    fn resetting_with_new_type_invalidates_old_type() {
        let mut bag = NamedProperties::new();
        assert_eq!(bag.set("Value", 3i32), PropertySetResult::Inserted);
        assert_eq!(bag.set("Value", 4i32), PropertySetResult::Replaced);
        assert_eq!(
            bag.set("Value", "four".to_string()),
            PropertySetResult::ReplacedWithNewType
        );

        assert!(matches!(
            bag.get::<i32>("Value"),
            Err(PropertyGetError::WrongType { .. })
        ));
        assert_eq!(bag.get::<String>("Value").unwrap(), "four");
    }

    #[test]
    fn fixed_type_bag_rejects_type_change() {
        let mut bag = NamedProperties::with_fixed_types();
        let _ = bag.set("Value", 3i32);
        assert_eq!(
            bag.set("Value", 3.0f32),
            PropertySetResult::RejectedTypeChange
        );
        assert_eq!(bag.get::<i32>("Value").unwrap(), 3, "Old value must survive");
    }

    #[test]
    fn clones_share_values_but_not_slots() {
        let mut a = NamedProperties::new();
        let _ = a.set("Name", "root".to_string());
        let mut b = a.clone();
        let _ = b.set("Name", "copy".to_string());

        assert_eq!(a.get::<String>("Name").unwrap(), "root");
        assert_eq!(b.get_ref::<String>("Name").unwrap(), "copy");
        assert!(b.remove("Name"));
        assert!(b.is_empty());
        assert_eq!(a.len(), 1);
    }
}
