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

//! Provides the 2D mathematics primitives used by the UI and profiler layers.
//!
//! The engine core only needs planar math: positions, extents, axis-aligned
//! rectangles, and colors. These are plain `Copy` value types with the usual
//! operator overloads.

// --- Declare Sub-Modules ---

pub mod color;
pub mod geometry;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::color::Rgba;
pub use self::geometry::Aabb2;
pub use self::vector::Vec2;

/// Error produced when a textual value cannot be coerced into a math type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseValueError {
    /// The text did not contain the expected number of comma-separated components.
    #[error("expected {expected} comma-separated components in '{text}'")]
    ComponentCount {
        /// The offending input.
        text: String,
        /// How many components were expected.
        expected: usize,
    },
    /// A component could not be parsed as a number.
    #[error("invalid number '{component}' in '{text}'")]
    InvalidNumber {
        /// The offending input.
        text: String,
        /// The component that failed to parse.
        component: String,
    },
}

// --- Utility Functions ---

/// Parses one finite float. `NaN` and infinities are rejected.
///
/// # Examples
///
/// ```
/// use ember_core::math::parse_scalar;
/// assert_eq!(parse_scalar(" 2.5 "), Ok(2.5));
/// assert!(parse_scalar("inf").is_err());
/// ```
pub fn parse_scalar(text: &str) -> Result<f32, ParseValueError> {
    let trimmed = text.trim();
    trimmed
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseValueError::InvalidNumber {
            text: text.to_string(),
            component: trimmed.to_string(),
        })
}

/// Splits `text` on commas and parses exactly `N` floats.
pub(crate) fn parse_components<const N: usize>(text: &str) -> Result<[f32; N], ParseValueError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(ParseValueError::ComponentCount {
            text: text.to_string(),
            expected: N,
        });
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseValueError::InvalidNumber {
                text: text.to_string(),
                component: part.to_string(),
            })?;
    }
    Ok(out)
}
