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

//! A minimal wall-clock stopwatch.

use std::time::{Duration, Instant};

/// Measures elapsed wall-clock time from the moment it is created or restarted.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start_time: Instant,
}

impl Stopwatch {
    /// Creates a stopwatch that starts immediately.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Restarts the stopwatch and returns the time elapsed before the restart.
    #[inline]
    pub fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time);
        self.start_time = now;
        elapsed
    }

    /// Time elapsed since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Elapsed time in fractional milliseconds.
    #[inline]
    pub fn elapsed_ms_f64(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Elapsed time in seconds.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SLEEP_DURATION_MS: u64 = 20;
    const SLEEP_MARGIN_MS: u64 = 500;

    #[test]
    fn elapsed_covers_sleep() {
        let watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));
        let elapsed = watch.elapsed();
        assert!(
            elapsed >= Duration::from_millis(SLEEP_DURATION_MS),
            "Elapsed ({elapsed:?}) should be at least the sleep duration"
        );
        assert!(
            elapsed < Duration::from_millis(SLEEP_DURATION_MS + SLEEP_MARGIN_MS),
            "Elapsed ({elapsed:?}) should be within the margin"
        );
    }

    #[test]
    fn restart_resets_the_origin() {
        let mut watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));
        let before = watch.restart();
        assert!(before >= Duration::from_millis(SLEEP_DURATION_MS));
        assert!(
            watch.elapsed() < before,
            "A restarted stopwatch should report less than the previous lap"
        );
    }
}
