// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-cycle cast snapshot and its draw ordering.

use crate::backdrop::BackdropHandle;
use crate::entity::EntityRef;
use crate::rect::Rect;
use crate::signal::{ScaleSignal, Signal};
use crate::view::ViewId;

/// One cast member's state, snapshotted from the external entity for the
/// current animation cycle.
///
/// The snapshot is a cache, not a second source of truth: signal mutations
/// made by the passes are written back to the entity before the cycle ends.
/// `cel_rect` is only valid once geometry resolution has run; `backdrop` is
/// only used by the reanimate replay.
#[derive(Clone, Debug)]
pub struct CastEntry {
    /// The external entity this entry mirrors.
    pub entity: EntityRef,
    /// Sprite resource id.
    pub view: ViewId,
    /// Loop index (normalized by geometry resolution).
    pub loop_no: i16,
    /// Cel index (normalized by geometry resolution).
    pub cel_no: i16,
    /// Palette variant.
    pub palette: i16,
    /// Screen x position.
    pub x: i16,
    /// Screen y position.
    pub y: i16,
    /// Depth/height offset.
    pub z: i16,
    /// Draw priority band.
    pub priority: i16,
    /// Animation signal bits (working copy).
    pub signal: Signal,
    /// Scaling flags (working copy).
    pub scale_signal: ScaleSignal,
    /// Horizontal scale factor, 128 = 100%.
    pub scale_x: i16,
    /// Vertical scale factor, 128 = 100%.
    pub scale_y: i16,
    /// On-screen bounding rect of the current cel.
    pub cel_rect: Rect,
    /// Position in the external list this cycle; the final sort tie-break.
    pub order: u16,
    /// Backdrop handle used by the reanimate replay.
    pub backdrop: BackdropHandle,
    /// Whether this entry was drawn or restored on screen this cycle.
    pub shown: bool,
}

impl CastEntry {
    /// Creates a snapshot with neutral geometry and scale for `entity` at
    /// list position `order`.
    #[must_use]
    pub fn new(entity: EntityRef, order: u16) -> Self {
        Self {
            entity,
            view: ViewId(0),
            loop_no: 0,
            cel_no: 0,
            palette: 0,
            x: 0,
            y: 0,
            z: 0,
            priority: 0,
            signal: Signal::empty(),
            scale_signal: ScaleSignal::empty(),
            scale_x: 128,
            scale_y: 128,
            cel_rect: Rect::EMPTY,
            order,
            backdrop: BackdropHandle::NONE,
            shown: false,
        }
    }
}

/// Sorts entries back-to-front by (y, z, original list order).
///
/// Equal-key relative order is load-bearing: rooms exist where two entities
/// share a position and must keep their call-order stacking (a container
/// rendering consistently open or closed depends on it). The comparator
/// therefore carries the insertion order as its final key rather than
/// relying on the sort primitive's own stability guarantee.
pub(crate) fn sort_back_to_front(entries: &mut [CastEntry]) {
    entries.sort_by(|a, b| (a.y, a.z, a.order).cmp(&(b.y, b.z, b.order)));
}
