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

//! The hierarchical per-frame profiler.
//!
//! Each frame builds a tree of timed samples rooted at a `"frame"` sample.
//! [`ProfilingSystem::mark_frame`] closes the tree, keeps it as the "last
//! frame" for reporting, frees the tree before it, and opens the next one.
//! Samples live in a fixed-capacity [`SampleArena`], so steady-state
//! profiling does not allocate.

mod arena;
mod clock;
mod error;
mod report;
mod sample;

pub use self::arena::{ArenaExhausted, Children, SampleArena};
pub use self::clock::{Clock, ManualClock, MonotonicClock};
pub use self::error::ProfilerError;
pub use self::report::{ProfileReport, ProfileReportNode, ReportSort};
pub use self::sample::{ProfileSample, SampleId};

use std::time::Duration;

use ember_core::memory::allocation_snapshot;

use crate::config::ProfilerConfig;

/// Tag of every frame root.
pub const FRAME_TAG: &str = "frame";

/// Weight of the previous average when folding in a new frame duration.
const AVERAGE_DECAY: f64 = 0.97;

/// Builds one sample tree per frame and reports on the previous one.
///
/// The system is single-threaded: it is owned by the main loop and passed by
/// `&mut` to whatever code wants to time itself.
pub struct ProfilingSystem<C: Clock = MonotonicClock> {
    clock: C,
    arena: SampleArena,
    current_root: Option<SampleId>,
    previous_root: Option<SampleId>,
    active: Option<SampleId>,
    enabled: bool,
    intent_to_enable: bool,
    average_frame_ms: Option<f64>,
    frames_completed: u64,
}

impl ProfilingSystem<MonotonicClock> {
    /// Creates a profiler timed by the wall clock.
    pub fn new(config: &ProfilerConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> ProfilingSystem<C> {
    /// Creates a profiler timed by `clock`. No frame is open until
    /// [`ProfilingSystem::start_new_frame`] or [`ProfilingSystem::mark_frame`].
    pub fn with_clock(config: &ProfilerConfig, clock: C) -> Self {
        log::info!(
            "Profiler initialized: {} sample slots, {}.",
            config.sample_capacity,
            if config.enabled { "enabled" } else { "disabled" }
        );
        Self {
            clock,
            arena: SampleArena::with_capacity(config.sample_capacity),
            current_root: None,
            previous_root: None,
            active: None,
            enabled: config.enabled,
            intent_to_enable: config.enabled,
            average_frame_ms: None,
            frames_completed: 0,
        }
    }

    /// Opens a new `"frame"` root sample.
    ///
    /// Fails if any sample is still open, which means the previous frame was
    /// never closed.
    pub fn start_new_frame(&mut self) -> Result<(), ProfilerError> {
        if !self.enabled {
            return Ok(());
        }
        if let Some(active) = self.active {
            return Err(ProfilerError::SampleAlreadyActive {
                tag: self.tag_of(active),
            });
        }
        let root = self.open_sample(FRAME_TAG, None)?;
        self.current_root = Some(root);
        self.active = Some(root);
        Ok(())
    }

    /// Starts timing a region nested in the currently open one.
    ///
    /// With no frame in progress the sample becomes the root of a new frame.
    pub fn push_sample(&mut self, tag: &'static str) -> Result<(), ProfilerError> {
        if !self.enabled {
            return Ok(());
        }
        let parent = self.active;
        let id = self.open_sample(tag, parent)?;
        match parent {
            Some(parent) => self.arena.link_child(parent, id),
            None => self.current_root = Some(id),
        }
        self.active = Some(id);
        Ok(())
    }

    /// Stops timing the innermost open region.
    ///
    /// The frame root is closed by [`ProfilingSystem::mark_frame`] only; popping
    /// it here is reported as an unbalanced pop.
    pub fn pop_sample(&mut self) -> Result<(), ProfilerError> {
        if !self.enabled {
            return Ok(());
        }
        match self.active {
            Some(active) if Some(active) != self.current_root => {
                self.close(active);
                Ok(())
            }
            _ => Err(ProfilerError::UnbalancedPop),
        }
    }

    /// Times `f` as a region named `tag`.
    pub fn scope<R>(
        &mut self,
        tag: &'static str,
        f: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, ProfilerError> {
        self.push_sample(tag)?;
        let result = f(self);
        self.pop_sample()?;
        Ok(result)
    }

    /// Ends the current frame and starts the next one.
    ///
    /// The ended tree becomes [`ProfilingSystem::last_frame`] and the tree it
    /// replaces is freed. A pending [`ProfilingSystem::set_enabled`] takes effect
    /// here. If samples were left open, the broken tree is discarded, the
    /// previous report stays intact, a fresh frame is still started, and the
    /// error is returned.
    pub fn mark_frame(&mut self) -> Result<(), ProfilerError> {
        let ended = self.end_previous_frame();
        if self.enabled != self.intent_to_enable {
            log::info!(
                "Profiling {}.",
                if self.intent_to_enable { "enabled" } else { "disabled" }
            );
        }
        self.enabled = self.intent_to_enable;
        let started = self.start_new_frame();
        ended.and(started)
    }

    fn end_previous_frame(&mut self) -> Result<(), ProfilerError> {
        if !self.enabled {
            return Ok(());
        }
        let Some(root) = self.current_root else {
            return Ok(());
        };

        if self.active != Some(root) {
            let (open, innermost) = self.open_below(root);
            log::error!(
                "Frame ended with {open} unpopped sample(s) (innermost '{innermost}'); discarding it."
            );
            self.arena.free_tree(root);
            self.current_root = None;
            self.active = None;
            return Err(ProfilerError::UnpoppedSamples { open, innermost });
        }

        if let Some(previous) = self.previous_root.take() {
            self.arena.free_tree(previous);
        }
        self.close(root);
        self.current_root = None;
        self.previous_root = Some(root);
        self.frames_completed += 1;

        let frame_ms = self
            .arena
            .get(root)
            .map_or(0.0, |s| self.clock.ticks_to_ms(s.duration_ticks()));
        self.average_frame_ms = Some(match self.average_frame_ms {
            Some(average) => average * AVERAGE_DECAY + frame_ms * (1.0 - AVERAGE_DECAY),
            None => frame_ms,
        });
        Ok(())
    }

    /// Attributes `count` draw calls to the innermost open region.
    pub fn add_draw_calls(&mut self, count: u32) {
        if !self.enabled {
            return;
        }
        if let Some(sample) = self.active.and_then(|id| self.arena.get_mut(id)) {
            sample.draw_calls += count;
        }
    }

    /// Requests profiling on or off from the next frame boundary.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.intent_to_enable = enabled;
    }

    /// Whether samples are currently being recorded.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Exponential moving average of completed frame durations.
    /// Zero until the first frame completes.
    pub fn average_frame_duration(&self) -> Duration {
        Duration::from_secs_f64(self.average_frame_ms.unwrap_or(0.0) / 1000.0)
    }

    /// Same as [`ProfilingSystem::average_frame_duration`], in milliseconds.
    pub fn average_frame_ms(&self) -> f64 {
        self.average_frame_ms.unwrap_or(0.0)
    }

    /// How many frames have completed; also the number of the last frame.
    pub fn frame_number(&self) -> u64 {
        self.frames_completed
    }

    /// Root of the most recently completed frame.
    pub fn last_frame(&self) -> Option<SampleId> {
        self.previous_root
    }

    /// Resolves a sample of the current or last frame.
    pub fn sample(&self, id: SampleId) -> Option<&ProfileSample> {
        self.arena.get(id)
    }

    /// Children of a sample, in push order.
    pub fn children(&self, id: SampleId) -> Children<'_> {
        self.arena.children(id)
    }

    /// Tag of the innermost open region.
    pub fn active_tag(&self) -> Option<&'static str> {
        self.active.map(|id| self.tag_of(id))
    }

    /// Samples currently held by the arena (current and last frame).
    pub fn live_samples(&self) -> usize {
        self.arena.live_count()
    }

    /// Duration of a sample in milliseconds.
    pub fn duration_ms(&self, id: SampleId) -> f64 {
        self.arena
            .get(id)
            .map_or(0.0, |s| self.clock.ticks_to_ms(s.duration_ticks()))
    }

    /// Aggregates the last completed frame by tag.
    pub fn generate_report(&self, sort: ReportSort) -> Option<ProfileReport> {
        let root = self.previous_root?;
        Some(ProfileReport::from_tree(
            &self.arena,
            root,
            &self.clock,
            self.frames_completed,
            sort,
        ))
    }

    /// Indented per-sample listing of the last completed frame.
    pub fn tree_view(&self) -> Option<String> {
        let root = self.previous_root?;
        Some(report::render_tree_view(&self.arena, root, &self.clock))
    }

    /// Writes the tree view and the report of the last completed frame to the log.
    pub fn log_report(&self, sort: ReportSort) {
        match (self.tree_view(), self.generate_report(sort)) {
            (Some(tree), Some(report)) => log::info!("\n{tree}{report}"),
            _ => log::debug!("No completed frame to report yet."),
        }
    }

    fn open_sample(
        &mut self,
        tag: &'static str,
        parent: Option<SampleId>,
    ) -> Result<SampleId, ProfilerError> {
        let sample = ProfileSample::open(tag, self.clock.now_ticks(), parent, allocation_snapshot());
        self.arena.alloc(sample).map_err(|e| {
            log::error!("Cannot push '{tag}': {} sample slots in use.", e.capacity);
            ProfilerError::from(e)
        })
    }

    fn close(&mut self, id: SampleId) {
        let now = self.clock.now_ticks();
        let snapshot = allocation_snapshot();
        self.active = match self.arena.get_mut(id) {
            Some(sample) => {
                sample.close(now, snapshot);
                sample.parent
            }
            None => None,
        };
    }

    fn tag_of(&self, id: SampleId) -> &'static str {
        self.arena.get(id).map_or("<freed>", |s| s.tag())
    }

    /// Counts open samples between the active one and `root`.
    fn open_below(&self, root: SampleId) -> (usize, &'static str) {
        let innermost = self.active.map_or(FRAME_TAG, |id| self.tag_of(id));
        let mut open = 0;
        let mut cursor = self.active;
        while let Some(id) = cursor {
            if id == root {
                break;
            }
            open += 1;
            cursor = self.arena.get(id).and_then(|s| s.parent);
        }
        (open, innermost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiler(capacity: usize) -> (ProfilingSystem<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let config = ProfilerConfig {
            sample_capacity: capacity,
            enabled: true,
        };
        (ProfilingSystem::with_clock(&config, clock.clone()), clock)
    }

    #[test]
    fn start_new_frame_rejects_open_sample() {
        let (mut p, _) = profiler(8);
        p.start_new_frame().unwrap();
        assert_eq!(
            p.start_new_frame(),
            Err(ProfilerError::SampleAlreadyActive { tag: FRAME_TAG })
        );
    }

    #[test]
    fn popping_the_frame_root_is_unbalanced() {
        let (mut p, _) = profiler(8);
        assert_eq!(p.pop_sample(), Err(ProfilerError::UnbalancedPop));
        p.start_new_frame().unwrap();
        assert_eq!(p.pop_sample(), Err(ProfilerError::UnbalancedPop));
        assert_eq!(p.active_tag(), Some(FRAME_TAG), "Failed pop must not move the cursor");
    }

    #[test]
    fn arena_exhaustion_is_reported() {
        let (mut p, _) = profiler(2);
        p.start_new_frame().unwrap();
        p.push_sample("a").unwrap();
        assert_eq!(
            p.push_sample("b"),
            Err(ProfilerError::ArenaExhausted { capacity: 2 })
        );
        assert_eq!(p.active_tag(), Some("a"));
    }

    #[test]
    fn draw_calls_go_to_innermost_sample() {
        let (mut p, _) = profiler(8);
        p.start_new_frame().unwrap();
        p.scope("render", |p| p.add_draw_calls(3)).unwrap();
        p.add_draw_calls(1);
        p.mark_frame().unwrap();

        let root = p.last_frame().unwrap();
        assert_eq!(p.sample(root).unwrap().draw_calls(), 1);
        let render = p.children(root).next().unwrap();
        assert_eq!(p.sample(render).unwrap().draw_calls(), 3);
    }

    #[test]
    fn rolling_average_is_seeded_then_blended() {
        let (mut p, clock) = profiler(8);
        p.start_new_frame().unwrap();
        clock.advance_ms(10);
        p.mark_frame().unwrap();
        assert!((p.average_frame_ms() - 10.0).abs() < 1e-9);

        clock.advance_ms(20);
        p.mark_frame().unwrap();
        assert!((p.average_frame_ms() - (10.0 * 0.97 + 20.0 * 0.03)).abs() < 1e-9);
    }

    #[test]
    fn only_two_frames_are_ever_retained() {
        let (mut p, _) = profiler(16);
        p.start_new_frame().unwrap();
        for _ in 0..5 {
            p.push_sample("work").unwrap();
            p.pop_sample().unwrap();
            p.mark_frame().unwrap();
        }
        // last frame: root + "work"; current frame: root.
        assert_eq!(p.live_samples(), 3);
        assert_eq!(p.frame_number(), 5);
    }
}
