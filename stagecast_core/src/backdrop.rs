// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parked screen backgrounds ("backdrops").
//!
//! Before an entity is drawn, the screen region under it is captured so the
//! pixels can be put back when the entity moves or disappears. This module
//! owns those captures. Slots are recycled through a free list and carry a
//! generation counter, so a stale handle (kept after its slot was restored
//! or freed and reused) is detected instead of silently corrupting another
//! entity's background.
//!
//! Each handle is owned by exactly one entity at a time. Restoring or
//! freeing the same handle twice is a caller contract violation and panics;
//! the [`NONE`](BackdropHandle::NONE) handle is always a no-op.

use core::fmt;

use crate::rect::Rect;
use crate::screen::Screen;
use crate::signal::ChannelMask;

/// Handle to one parked background region.
///
/// The zero value means "no saved region" and round-trips through the
/// external entity's under-bits property, which game scripts clear by
/// writing 0.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BackdropHandle(u32);

impl BackdropHandle {
    /// The "no saved region" handle.
    pub const NONE: Self = Self(0);

    /// Returns whether this is the [`NONE`](Self::NONE) handle.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Raw value, for storage in an external property slot.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Rebuilds a handle from its raw value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    const fn pack(idx: u16, generation: u16) -> Self {
        Self(((generation as u32) << 16) | (idx as u32 + 1))
    }

    const fn slot(self) -> usize {
        (self.0 & 0xFFFF) as usize - 1
    }

    const fn generation(self) -> u16 {
        (self.0 >> 16) as u16
    }
}

impl fmt::Debug for BackdropHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "BackdropHandle(none)")
        } else {
            write!(
                f,
                "BackdropHandle({}@gen{})",
                self.slot(),
                self.generation()
            )
        }
    }
}

struct Slot<P> {
    generation: u16,
    saved: Option<(Rect, ChannelMask, P)>,
}

/// Owner of all parked background regions.
///
/// Generic over the screen's captured-pixels payload; the store tracks
/// rects, masks, and handle lifecycle, while the [`Screen`] does the pixel
/// copies.
pub struct BackdropStore<P> {
    slots: Vec<Slot<P>>,
    free: Vec<u16>,
}

impl<P> fmt::Debug for BackdropStore<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackdropStore")
            .field("slots", &self.slots.len())
            .field("live", &self.live())
            .finish()
    }
}

impl<P> Default for BackdropStore<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> BackdropStore<P> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of currently parked regions.
    #[must_use]
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Captures the selected channels of `rect` and returns the owning
    /// handle.
    pub fn save<S: Screen<Saved = P>>(
        &mut self,
        screen: &S,
        rect: Rect,
        mask: ChannelMask,
    ) -> BackdropHandle {
        let pixels = screen.capture(rect, mask);
        let idx = if let Some(idx) = self.free.pop() {
            self.slots[idx as usize].saved = Some((rect, mask, pixels));
            idx
        } else {
            assert!(self.slots.len() < u16::MAX as usize, "backdrop store full");
            self.slots.push(Slot {
                generation: 0,
                saved: Some((rect, mask, pixels)),
            });
            (self.slots.len() - 1) as u16
        };
        BackdropHandle::pack(idx, self.slots[idx as usize].generation)
    }

    /// Blits a parked region back to the screen and releases its slot.
    ///
    /// A [`NONE`](BackdropHandle::NONE) handle is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale (already restored or freed).
    pub fn restore<S: Screen<Saved = P>>(&mut self, screen: &mut S, handle: BackdropHandle) {
        if handle.is_none() {
            return;
        }
        let (rect, mask, pixels) = self.take(handle);
        screen.blit(rect, mask, &pixels);
    }

    /// Discards a parked region without touching the screen.
    ///
    /// A [`NONE`](BackdropHandle::NONE) handle is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale (already restored or freed).
    pub fn free(&mut self, handle: BackdropHandle) {
        if handle.is_none() {
            return;
        }
        let _ = self.take(handle);
    }

    /// Removes and returns the payload for `handle`, recycling its slot.
    fn take(&mut self, handle: BackdropHandle) -> (Rect, ChannelMask, P) {
        let idx = handle.slot();
        let slot = self
            .slots
            .get_mut(idx)
            .unwrap_or_else(|| panic!("stale backdrop handle: {handle:?}"));
        assert!(
            slot.generation == handle.generation() && slot.saved.is_some(),
            "stale backdrop handle: {handle:?} (current gen {})",
            slot.generation
        );
        let Some(saved) = slot.saved.take() else {
            unreachable!()
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx as u16);
        saved
    }
}
