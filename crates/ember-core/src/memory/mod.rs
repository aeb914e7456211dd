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

//! Global allocation counters shared between the tracking allocator and the profiler.
//!
//! A registered global allocator increments these counters; the profiler reads
//! them when a sample starts and stops to attribute allocations to that scope.
//! When no tracking allocator is installed the counters simply stay at zero.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

// --- Global Memory Counters ---

/// Total number of bytes currently allocated.
pub static CURRENTLY_ALLOCATED_BYTES: AtomicUsize = AtomicUsize::new(0);

/// Peak number of bytes ever allocated simultaneously.
pub static PEAK_ALLOCATED_BYTES: AtomicU64 = AtomicU64::new(0);

/// Total number of allocation calls made.
pub static TOTAL_ALLOCATIONS: AtomicU64 = AtomicU64::new(0);

/// Total number of deallocation calls made.
pub static TOTAL_DEALLOCATIONS: AtomicU64 = AtomicU64::new(0);

/// Cumulative bytes ever allocated.
pub static BYTES_ALLOCATED_LIFETIME: AtomicU64 = AtomicU64::new(0);

/// A point-in-time reading of the global counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationSnapshot {
    /// Allocation calls made so far.
    pub allocations: u64,
    /// Bytes allocated so far.
    pub bytes_allocated: u64,
}

impl AllocationSnapshot {
    /// Returns the allocations that happened between `earlier` and `self`.
    pub fn since(&self, earlier: &AllocationSnapshot) -> AllocationSnapshot {
        AllocationSnapshot {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            bytes_allocated: self.bytes_allocated.saturating_sub(earlier.bytes_allocated),
        }
    }
}

/// Reads the cumulative allocation counters.
pub fn allocation_snapshot() -> AllocationSnapshot {
    AllocationSnapshot {
        allocations: TOTAL_ALLOCATIONS.load(Ordering::Relaxed),
        bytes_allocated: BYTES_ALLOCATED_LIFETIME.load(Ordering::Relaxed),
    }
}

/// Gets the number of bytes currently allocated by the global allocator.
pub fn get_currently_allocated_bytes() -> usize {
    CURRENTLY_ALLOCATED_BYTES.load(Ordering::Relaxed)
}

/// Gets the peak number of bytes ever allocated simultaneously.
pub fn get_peak_allocated_bytes() -> u64 {
    PEAK_ALLOCATED_BYTES.load(Ordering::Relaxed)
}
