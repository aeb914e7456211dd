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

//! A fixed-capacity pool of profile samples.

use super::sample::{ProfileSample, SampleId};

/// Returned when every slot of a [`SampleArena`] is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaExhausted {
    /// The arena's slot count.
    pub capacity: usize,
}

struct Slot {
    generation: u32,
    live: bool,
    sample: ProfileSample,
}

/// A preallocated pool of [`ProfileSample`] slots with a free list.
///
/// All memory is reserved up front, so allocating and freeing samples never
/// touches the heap. Running out of slots is reported to the caller rather
/// than growing the pool.
pub struct SampleArena {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    scratch: Vec<SampleId>,
}

impl SampleArena {
    /// Creates an arena holding at most `capacity` live samples.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                live: false,
                sample: ProfileSample::default(),
            })
            .collect();
        // Reversed so that slot 0 is handed out first.
        let free_slots = (0..capacity as u32).rev().collect();
        Self {
            slots,
            free_slots,
            scratch: Vec::with_capacity(capacity),
        }
    }

    /// Total slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of samples currently allocated.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free_slots.len()
    }

    /// Moves `sample` into a free slot.
    pub fn alloc(&mut self, sample: ProfileSample) -> Result<SampleId, ArenaExhausted> {
        let index = self.free_slots.pop().ok_or(ArenaExhausted {
            capacity: self.slots.len(),
        })?;
        let slot = &mut self.slots[index as usize];
        slot.live = true;
        slot.sample = sample;
        Ok(SampleId {
            index,
            generation: slot.generation,
        })
    }

    /// Returns the slot of `id` to the free list. Stale or unknown ids are ignored.
    pub fn free(&mut self, id: SampleId) {
        if let Some(slot) = self.slots.get_mut(id.index as usize) {
            if slot.live && slot.generation == id.generation {
                slot.live = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_slots.push(id.index);
            }
        }
    }

    /// Frees `root` and every sample below it. Returns how many samples were freed.
    pub fn free_tree(&mut self, root: SampleId) -> usize {
        let mut stack = std::mem::take(&mut self.scratch);
        stack.clear();
        stack.push(root);

        let mut freed = 0;
        while let Some(id) = stack.pop() {
            let mut child = self.get(id).and_then(|s| s.first_child);
            while let Some(c) = child {
                stack.push(c);
                child = self.get(c).and_then(|s| s.next_sibling);
            }
            if self.get(id).is_some() {
                self.free(id);
                freed += 1;
            }
        }

        self.scratch = stack;
        freed
    }

    /// Resolves a live sample.
    pub fn get(&self, id: SampleId) -> Option<&ProfileSample> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.live && slot.generation == id.generation)
            .map(|slot| &slot.sample)
    }

    /// Resolves a live sample mutably.
    pub fn get_mut(&mut self, id: SampleId) -> Option<&mut ProfileSample> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.live && slot.generation == id.generation)
            .map(|slot| &mut slot.sample)
    }

    /// Appends `child` as the last child of `parent`.
    pub(crate) fn link_child(&mut self, parent: SampleId, child: SampleId) {
        let previous_last = match self.get_mut(parent) {
            Some(p) => {
                let previous = p.last_child;
                if p.first_child.is_none() {
                    p.first_child = Some(child);
                }
                p.last_child = Some(child);
                previous
            }
            None => return,
        };
        if let Some(last) = previous_last {
            if let Some(sibling) = self.get_mut(last) {
                sibling.next_sibling = Some(child);
            }
        }
    }

    /// Iterates the children of `id` in push order.
    pub fn children(&self, id: SampleId) -> Children<'_> {
        Children {
            arena: self,
            next: self.get(id).and_then(|s| s.first_child),
        }
    }
}

/// Iterator over a sample's children, see [`SampleArena::children`].
pub struct Children<'a> {
    arena: &'a SampleArena,
    next: Option<SampleId>,
}

impl Iterator for Children<'_> {
    type Item = SampleId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.get(current).and_then(|s| s.next_sibling);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::memory::AllocationSnapshot;

    fn sample(tag: &'static str, parent: Option<SampleId>) -> ProfileSample {
        ProfileSample::open(tag, 0, parent, AllocationSnapshot::default())
    }

    #[test]
    fn alloc_fails_when_full_instead_of_growing() {
        let mut arena = SampleArena::with_capacity(2);
        arena.alloc(sample("a", None)).unwrap();
        arena.alloc(sample("b", None)).unwrap();
        assert_eq!(
            arena.alloc(sample("c", None)),
            Err(ArenaExhausted { capacity: 2 })
        );
        assert_eq!(arena.capacity(), 2);
    }

    #[test]
    fn freed_slot_is_recycled_with_new_generation() {
        let mut arena = SampleArena::with_capacity(1);
        let first = arena.alloc(sample("a", None)).unwrap();
        arena.free(first);
        let second = arena.alloc(sample("b", None)).unwrap();

        assert_eq!(first.index, second.index);
        assert_ne!(first.generation, second.generation);
        assert!(arena.get(first).is_none(), "Stale handle must not resolve");
        assert_eq!(arena.get(second).map(|s| s.tag()), Some("b"));
    }

    #[test]
    fn children_iterate_in_push_order() {
        let mut arena = SampleArena::with_capacity(8);
        let root = arena.alloc(sample("frame", None)).unwrap();
        for tag in ["update", "render", "present"] {
            let child = arena.alloc(sample(tag, Some(root))).unwrap();
            arena.link_child(root, child);
        }

        let tags: Vec<_> = arena
            .children(root)
            .map(|id| arena.get(id).unwrap().tag())
            .collect();
        assert_eq!(tags, ["update", "render", "present"]);
    }

    #[test]
    fn free_tree_returns_every_descendant() {
        let mut arena = SampleArena::with_capacity(8);
        let root = arena.alloc(sample("frame", None)).unwrap();
        let a = arena.alloc(sample("a", Some(root))).unwrap();
        arena.link_child(root, a);
        let b = arena.alloc(sample("b", Some(a))).unwrap();
        arena.link_child(a, b);
        let c = arena.alloc(sample("c", Some(root))).unwrap();
        arena.link_child(root, c);

        assert_eq!(arena.live_count(), 4);
        assert_eq!(arena.free_tree(root), 4);
        assert_eq!(arena.live_count(), 0);
    }
}
