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

//! A `GlobalAlloc` wrapper that counts allocations for the profiler.

use ember_core::memory::{
    BYTES_ALLOCATED_LIFETIME, CURRENTLY_ALLOCATED_BYTES, PEAK_ALLOCATED_BYTES, TOTAL_ALLOCATIONS,
    TOTAL_DEALLOCATIONS,
};
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::Ordering;

/// Wraps an allocator (the system one by default) and updates the global
/// counters in `ember_core::memory` on every call.
///
/// Register it in the binary to get allocation counts in profiler samples:
///
/// ```rust,ignore
/// use ember_telemetry::TrackingAllocator;
///
/// #[global_allocator]
/// static GLOBAL: TrackingAllocator = TrackingAllocator::new(std::alloc::System);
/// ```
///
/// The allocator never logs: logging may allocate, which would recurse.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackingAllocator<A = System> {
    inner: A,
}

impl<A> TrackingAllocator<A> {
    /// Wraps `inner`.
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

fn record_alloc(size: usize) {
    let previous = CURRENTLY_ALLOCATED_BYTES.fetch_add(size, Ordering::Relaxed);
    PEAK_ALLOCATED_BYTES.fetch_max(previous.saturating_add(size) as u64, Ordering::Relaxed);
    TOTAL_ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    BYTES_ALLOCATED_LIFETIME.fetch_add(size as u64, Ordering::Relaxed);
}

fn record_dealloc(size: usize) {
    // Saturate rather than wrap if memory allocated before the allocator
    // was counting is freed.
    let _ = CURRENTLY_ALLOCATED_BYTES.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        Some(current.saturating_sub(size))
    });
    TOTAL_DEALLOCATIONS.fetch_add(1, Ordering::Relaxed);
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for TrackingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        record_dealloc(layout.size());
        self.inner.dealloc(ptr, layout);
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    /// A reallocation counts as freeing the old block and allocating the new one.
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = self.inner.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            record_dealloc(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}
