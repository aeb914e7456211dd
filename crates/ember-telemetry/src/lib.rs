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

//! # Ember Telemetry
//!
//! Frame profiling for the engine: a hierarchical per-frame sample tree on a
//! fixed-capacity arena, per-tag frame reports, scoped log timers, and a
//! tracking global allocator that attributes heap traffic to samples.

#![warn(missing_docs)]

pub mod allocators;
pub mod config;
pub mod profiler;
pub mod utils;

pub use allocators::TrackingAllocator;
pub use config::ProfilerConfig;
pub use profiler::{
    Clock, ManualClock, MonotonicClock, ProfileReport, ProfileReportNode, ProfileSample,
    ProfilerError, ProfilingSystem, ReportSort, SampleId,
};
pub use utils::timer::LogSection;
