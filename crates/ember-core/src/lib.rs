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

//! # Ember Core
//!
//! Foundational crate containing value types, the dynamically typed property bag,
//! the event bus, and the contracts through which the engine core talks to its
//! external collaborators (renderer, input devices, texture loading).
//!
//! Nothing in this crate owns GPU state or polls devices. Concrete backends live
//! outside the core and are handed to the systems that need them at construction.

#![warn(missing_docs)]

pub mod event;
pub mod input;
pub mod math;
pub mod memory;
pub mod properties;
pub mod renderer;
pub mod utils;

pub use event::EventBus;
pub use properties::{NamedProperties, PropertyGetError, PropertySetResult};
pub use utils::timer::Stopwatch;
