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

//! Provides RAII timers that report how long a scope took when it ends.

use std::borrow::Cow;

use ember_core::utils::timer::Stopwatch;

/// Logs the wall-clock time spent in a scope when dropped.
///
/// Unlike profiler samples this needs no frame and works anywhere, which makes
/// it suited to one-off costly operations such as loading a UI description.
///
/// ```
/// use ember_telemetry::LogSection;
///
/// {
///     let _section = LogSection::new("load level");
///     // ... work ...
/// } // logs "[load level]: took 0.42 ms"
/// ```
pub struct LogSection {
    tag: Cow<'static, str>,
    stopwatch: Stopwatch,
}

impl LogSection {
    /// Starts timing a section named `tag`.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            stopwatch: Stopwatch::new(),
        }
    }

    /// The section's name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Milliseconds elapsed so far.
    pub fn elapsed_ms(&self) -> f64 {
        self.stopwatch.elapsed_ms_f64()
    }
}

impl Drop for LogSection {
    fn drop(&mut self) {
        log::info!("[{}]: took {:.2} ms", self.tag, self.elapsed_ms());
    }
}
