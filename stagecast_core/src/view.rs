// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite metadata contract.
//!
//! The resource cache owns and decodes sprite bitmaps; the core only needs
//! cel geometry and a handful of per-view facts. Indices passed to these
//! methods are always in range; the engine normalizes out-of-range loop and
//! cel indices before any metadata lookup.

use core::fmt;

use crate::rect::Rect;

/// Identifies a sprite ("view") resource.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub i16);

impl fmt::Debug for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewId({})", self.0)
    }
}

/// Read access to sprite cel metadata.
pub trait CelSource {
    /// Number of loops in the view.
    fn loop_count(&self, view: ViewId) -> i16;

    /// Number of cels in the given loop.
    fn cel_count(&self, view: ViewId, loop_no: i16) -> i16;

    /// Unscaled pixel height of a cel.
    fn cel_height(&self, view: ViewId, loop_no: i16, cel_no: i16) -> i16;

    /// Whether the view participates in cel scaling. Some views are
    /// authored unscalable and must render at 100% regardless of entity
    /// scale state.
    fn is_scalable(&self, view: ViewId) -> bool;

    /// On-screen rect of a cel anchored at `(x, y)` with depth offset `z`.
    fn cel_rect(&self, view: ViewId, loop_no: i16, cel_no: i16, x: i16, y: i16, z: i16) -> Rect;

    /// On-screen rect of a cel with fixed-point scale factors applied
    /// (128 = 100%).
    fn cel_rect_scaled(
        &self,
        view: ViewId,
        loop_no: i16,
        cel_no: i16,
        x: i16,
        y: i16,
        z: i16,
        scale_x: i16,
        scale_y: i16,
    ) -> Rect;

    /// Legacy rect rule used by one historical title: the result is derived
    /// from both the cel geometry and the entity's previous published rect
    /// (`base`).
    fn cel_rect_legacy(
        &self,
        view: ViewId,
        loop_no: i16,
        cel_no: i16,
        x: i16,
        y: i16,
        z: i16,
        base: Rect,
    ) -> Rect;
}
