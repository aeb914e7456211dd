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

//! The node type of the per-frame timing tree.

use ember_core::memory::AllocationSnapshot;

/// A handle to a [`ProfileSample`] living in a [`super::SampleArena`].
///
/// Combines a slot index with a generation count: when a slot is recycled its
/// generation is bumped, so handles into an already-freed frame resolve to
/// nothing instead of to an unrelated sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleId {
    /// Slot index in the arena.
    pub index: u32,
    /// Generation of the slot when this handle was issued.
    pub generation: u32,
}

/// One timed region of a frame.
///
/// Children form an intrusive singly linked list threaded through the arena
/// (`first_child` -> `next_sibling` -> ...), appended at `last_child` so
/// iteration follows push order.
#[derive(Debug, Clone, Default)]
pub struct ProfileSample {
    pub(crate) tag: &'static str,
    pub(crate) start_ticks: u64,
    pub(crate) end_ticks: Option<u64>,
    pub(crate) parent: Option<SampleId>,
    pub(crate) first_child: Option<SampleId>,
    pub(crate) last_child: Option<SampleId>,
    pub(crate) next_sibling: Option<SampleId>,
    pub(crate) draw_calls: u32,
    pub(crate) alloc_count: u64,
    pub(crate) alloc_bytes: u64,
    pub(crate) alloc_start: AllocationSnapshot,
}

impl ProfileSample {
    pub(crate) fn open(
        tag: &'static str,
        start_ticks: u64,
        parent: Option<SampleId>,
        alloc_start: AllocationSnapshot,
    ) -> Self {
        Self {
            tag,
            start_ticks,
            parent,
            alloc_start,
            ..Default::default()
        }
    }

    /// Stamps the end of the region. Only the first call has an effect.
    pub(crate) fn close(&mut self, end_ticks: u64, alloc_end: AllocationSnapshot) {
        if self.end_ticks.is_some() {
            return;
        }
        self.end_ticks = Some(end_ticks.max(self.start_ticks));
        let delta = alloc_end.since(&self.alloc_start);
        self.alloc_count = delta.allocations;
        self.alloc_bytes = delta.bytes_allocated;
    }

    /// The tag the region was pushed with.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Clock ticks at push time.
    pub fn start_ticks(&self) -> u64 {
        self.start_ticks
    }

    /// Clock ticks at pop time, `None` while the region is still open.
    pub fn end_ticks(&self) -> Option<u64> {
        self.end_ticks
    }

    /// Duration in ticks. An open sample reports zero.
    pub fn duration_ticks(&self) -> u64 {
        self.end_ticks
            .map_or(0, |end| end.saturating_sub(self.start_ticks))
    }

    /// The enclosing region, `None` for a frame root.
    pub fn parent(&self) -> Option<SampleId> {
        self.parent
    }

    /// Draw calls attributed to this region (not including children).
    pub fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    /// Heap allocations made while the region was open, children included.
    pub fn alloc_count(&self) -> u64 {
        self.alloc_count
    }

    /// Bytes allocated while the region was open, children included.
    pub fn alloc_bytes(&self) -> u64 {
        self.alloc_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_stamps_end_only_once() {
        let mut sample = ProfileSample::open("update", 100, None, AllocationSnapshot::default());
        assert_eq!(sample.duration_ticks(), 0);

        sample.close(
            250,
            AllocationSnapshot {
                allocations: 2,
                bytes_allocated: 64,
            },
        );
        sample.close(900, AllocationSnapshot::default());

        assert_eq!(sample.end_ticks(), Some(250));
        assert_eq!(sample.duration_ticks(), 150);
        assert_eq!(sample.alloc_count(), 2);
        assert_eq!(sample.alloc_bytes(), 64);
    }

    #[test]
    fn end_never_precedes_start() {
        let mut sample = ProfileSample::open("render", 500, None, AllocationSnapshot::default());
        sample.close(400, AllocationSnapshot::default());
        assert_eq!(sample.end_ticks(), Some(500));
    }
}
