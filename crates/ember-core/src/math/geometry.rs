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

//! Provides the planar axis-aligned bounding box used for widget bounds and hit tests.

use super::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Represents a 2D Axis-Aligned Bounding Box.
///
/// Defined by its minimum (bottom-left) and maximum (top-right) corners. No
/// ordering is enforced after construction: bounds pipelines may legitimately
/// produce inverted boxes, and callers can check [`Aabb2::is_valid`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Aabb2 {
    /// The corner of the box with the smallest coordinates on both axes.
    pub min: Vec2,
    /// The corner of the box with the largest coordinates on both axes.
    pub max: Vec2,
}

impl Aabb2 {
    /// A degenerate box at the origin.
    pub const ZERO: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    /// The unit box spanning `(0,0)-(1,1)`.
    pub const ZERO_TO_ONE: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ONE,
    };

    /// Creates a new `Aabb2` from its corners, as given.
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a box anchored at `min` with the given `size`.
    #[inline]
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    /// The width of the box (may be negative for an inverted box).
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// The height of the box (may be negative for an inverted box).
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// The full size of the box.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// The center point of the box.
    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Checks that `min <= max` on both axes. Degenerate boxes are valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Checks if a point is strictly inside the box.
    #[inline]
    pub fn is_point_inside(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }

    /// Checks if a point is inside the box or on its boundary.
    #[inline]
    pub fn is_point_on_or_inside(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Checks whether two boxes overlap. Touching edges count as overlapping.
    #[inline]
    pub fn intersects(&self, other: &Aabb2) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns the smallest box enclosing both `self` and `other`.
    #[inline]
    pub fn merge(&self, other: &Aabb2) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the smallest box enclosing every box in `boxes`, seeded from the
    /// first element. `None` when the iterator is empty.
    pub fn enclosing<I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = Aabb2>,
    {
        let mut iter = boxes.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, b| acc.merge(&b)))
    }

    /// Returns the box grown outward by `amount` on every side.
    /// Negative components shrink the box.
    #[inline]
    pub fn expanded(&self, amount: Vec2) -> Self {
        Self {
            min: self.min - amount,
            max: self.max + amount,
        }
    }

    /// Returns the box scaled about its own center.
    #[inline]
    pub fn scaled_about_center(&self, scale: f32) -> Self {
        let center = self.center();
        let half = self.size() * (0.5 * scale);
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

impl Add<Vec2> for Aabb2 {
    type Output = Self;
    /// Translates the box by `rhs`.
    #[inline]
    fn add(self, rhs: Vec2) -> Self::Output {
        Self {
            min: self.min + rhs,
            max: self.max + rhs,
        }
    }
}

impl AddAssign<Vec2> for Aabb2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.min += rhs;
        self.max += rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aabb(x0: f32, y0: f32, x1: f32, y1: f32) -> Aabb2 {
        Aabb2::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    #[test]
    fn point_on_boundary_counts_as_inside() {
        let b = aabb(0.0, 0.0, 10.0, 10.0);
        assert!(b.is_point_on_or_inside(Vec2::new(10.0, 0.0)));
        assert!(!b.is_point_inside(Vec2::new(10.0, 0.0)));
        assert!(!b.is_point_on_or_inside(Vec2::new(10.1, 5.0)));
    }

    #[test]
    fn enclosing_is_seeded_from_first_box_not_origin() {
        let boxes = [aabb(5.0, 5.0, 6.0, 6.0), aabb(8.0, 7.0, 9.0, 12.0)];
        let enclosing = Aabb2::enclosing(boxes).unwrap();
        assert_eq!(enclosing, aabb(5.0, 5.0, 9.0, 12.0));
        assert!(Aabb2::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn expanded_grows_every_side() {
        let b = aabb(0.0, 0.0, 10.0, 10.0).expanded(Vec2::splat(2.0));
        assert_eq!(b, aabb(-2.0, -2.0, 12.0, 12.0));
    }

    #[test]
    fn scaled_about_center_keeps_center() {
        let b = aabb(0.0, 0.0, 10.0, 4.0);
        let s = b.scaled_about_center(0.5);
        assert_eq!(s.center(), b.center());
        assert_eq!(s.size(), Vec2::new(5.0, 2.0));
    }

    #[test]
    fn translation_moves_both_corners() {
        let mut b = aabb(0.0, 0.0, 1.0, 1.0);
        b += Vec2::new(700.0, 20.0);
        assert_eq!(b, aabb(700.0, 20.0, 701.0, 21.0));
    }
}
