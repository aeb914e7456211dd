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

//! Defines the `Rgba` color type used for widget fills, borders, and draw tints.

use serde::{Deserialize, Serialize};
use std::ops::Mul;
use std::str::FromStr;

use super::{parse_components, ParseValueError};

/// An RGBA color with `f32` components in the `[0, 1]` range.
///
/// `#[repr(C)]` keeps the layout stable so recorded draw commands can be
/// handed to a GPU backend without conversion.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Rgba {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl Rgba {
    // --- Common Color Constants ---

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque red.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new `Rgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Rgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color from 8-bit channel values.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Creates a color from a packed `0xRRGGBBAA` value.
    #[inline]
    pub fn from_hex(hex: u32) -> Self {
        let [r, g, b, a] = hex.to_be_bytes();
        Self::from_u8(r, g, b, a)
    }

    /// Returns a copy of this color with a different alpha value.
    #[inline]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Parses a color from its textual description form.
    ///
    /// Two forms are accepted:
    /// - `"0xRRGGBBAA"` (the `0x` prefix is case-insensitive; 6 digits imply opaque),
    /// - `"R,G,B"` with each channel in `0..=255`, always opaque.
    ///
    /// # Examples
    ///
    /// ```
    /// use ember_core::math::Rgba;
    /// assert_eq!(Rgba::parse("0xFF0000FF").unwrap(), Rgba::RED);
    /// assert_eq!(Rgba::parse("0,0,255").unwrap(), Rgba::BLUE);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseValueError> {
        let trimmed = text.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"));

        if let Some(digits) = hex {
            let invalid = || ParseValueError::InvalidNumber {
                text: text.to_string(),
                component: digits.to_string(),
            };
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
            return match digits.len() {
                8 => Ok(Self::from_hex(value)),
                6 => Ok(Self::from_hex((value << 8) | 0xFF)),
                _ => Err(invalid()),
            };
        }

        let [r, g, b] = parse_components::<3>(trimmed)?;
        Ok(Self::rgb(r / 255.0, g / 255.0, b / 255.0))
    }
}

impl Default for Rgba {
    /// Returns opaque white.
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgba {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Mul<f32> for Rgba {
    type Output = Self;
    /// Scales the color's alpha by `rhs`. Used for inherited opacity.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            a: self.a * rhs,
            ..self
        }
    }
}
