// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal integer pixel rectangle.
//!
//! This type covers the subset of rectangle algebra the animation core
//! actually needs (clip, extend, emptiness, edge clamping) without pulling in
//! a general geometry crate. Coordinates are 16-bit and half-open: `right`
//! and `bottom` are one past the last pixel, so a rect is empty whenever
//! `left >= right` or `top >= bottom`.

use core::fmt;

/// An axis-aligned half-open pixel rectangle with `i16` coordinates.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Leftmost column (inclusive).
    pub left: i16,
    /// Topmost row (inclusive).
    pub top: i16,
    /// Rightmost column (exclusive).
    pub right: i16,
    /// Bottommost row (exclusive).
    pub bottom: i16,
}

impl Rect {
    /// The zero-area rect at the origin.
    pub const EMPTY: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// Creates a rect from its four edges.
    #[must_use]
    pub const fn new(left: i16, top: i16, right: i16, bottom: i16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns the width in pixels (zero for inverted rects).
    #[must_use]
    pub const fn width(self) -> i16 {
        if self.right > self.left {
            self.right - self.left
        } else {
            0
        }
    }

    /// Returns the height in pixels (zero for inverted rects).
    #[must_use]
    pub const fn height(self) -> i16 {
        if self.bottom > self.top {
            self.bottom - self.top
        } else {
            0
        }
    }

    /// Returns whether the rect contains no pixels.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Returns the intersection of `self` and `other`.
    ///
    /// The result may be empty; it is never inverted (edges are clamped so
    /// `left <= right` and `top <= bottom`).
    #[must_use]
    pub fn clip(self, other: Self) -> Self {
        let mut r = Self {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        };
        if r.right < r.left {
            r.right = r.left;
        }
        if r.bottom < r.top {
            r.bottom = r.top;
        }
        r
    }

    /// Returns the smallest rect containing both `self` and `other`.
    #[must_use]
    pub fn extend(self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Returns whether `self` and `other` share at least one pixel.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        !self.clip(other).is_empty()
    }

    /// Returns `self` moved by `(dx, dy)`.
    #[must_use]
    pub const fn translated(self, dx: i16, dy: i16) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Returns whether the pixel at `(x, y)` lies inside the rect.
    #[must_use]
    pub const fn contains(self, x: i16, y: i16) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({}, {} -> {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}
