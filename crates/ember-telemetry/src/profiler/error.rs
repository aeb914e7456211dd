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

use super::arena::ArenaExhausted;

/// Misuse of the profiler's push/pop protocol, or resource exhaustion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfilerError {
    /// A new frame was started while a sample was still open.
    #[error("sample '{tag}' is still active; the previous frame was not closed")]
    SampleAlreadyActive {
        /// Tag of the open sample.
        tag: &'static str,
    },
    /// `pop_sample` was called with nothing left to pop.
    #[error("pop_sample called without a matching push_sample")]
    UnbalancedPop,
    /// The frame ended with pushed samples that were never popped.
    #[error("frame ended with {open} unpopped sample(s), innermost '{innermost}'")]
    UnpoppedSamples {
        /// How many samples were still open below the frame root.
        open: usize,
        /// Tag of the innermost open sample.
        innermost: &'static str,
    },
    /// Every arena slot was in use.
    #[error("profiler sample arena exhausted ({capacity} samples); raise the sample capacity")]
    ArenaExhausted {
        /// The arena's slot count.
        capacity: usize,
    },
}

impl From<ArenaExhausted> for ProfilerError {
    fn from(e: ArenaExhausted) -> Self {
        ProfilerError::ArenaExhausted {
            capacity: e.capacity,
        }
    }
}
