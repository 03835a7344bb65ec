// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signal, scale-signal, and screen-channel bit masks.
//!
//! The [`Signal`] encoding is the historical interpreter encoding. It is not
//! free to change: the mask round-trips verbatim through the external
//! entity's `signal` property, and game scripts read and write individual
//! bits directly.

use bitflags::bitflags;

bitflags! {
    /// Per-entity animation state flags.
    ///
    /// Each bit is toggled by specific animation passes; see the `engine`
    /// module for which pass reads and writes which bit. The working copy in
    /// a cast entry is a cache; every mutation is written back to the
    /// external entity at the end of the cycle.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Signal: u16 {
        /// Entity wants to stop receiving per-cycle redraws.
        const STOP_UPDATE = 0x0001;
        /// The sprite cel changed while in no-update state.
        const VIEW_UPDATED = 0x0002;
        /// Entity is in no-update state (background parked under it).
        const NO_UPDATE = 0x0004;
        /// Entity is invisible this cycle.
        const HIDDEN = 0x0008;
        /// Priority is externally fixed; never recomputed from y.
        const FIXED_PRIORITY = 0x0010;
        /// Entity is redrawn every cycle regardless of update state.
        const ALWAYS_UPDATE = 0x0020;
        /// Force a redraw of a no-update entity this cycle.
        const FORCE_UPDATE = 0x0040;
        /// Entity's parked background must be dropped, not restored.
        const REMOVE_VIEW = 0x0080;
        /// Update callback is suppressed for this entity.
        const FROZEN = 0x0100;
        /// Entity does not write the control-channel occlusion strip.
        const IGNORE_ACTOR = 0x4000;
        /// Entity asks to be disposed at the end of the cycle.
        const DISPOSE_ME = 0x8000;
    }
}

bitflags! {
    /// Per-entity scaling flags, stored in the external `scaleSignal`
    /// property.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ScaleSignal: u16 {
        /// Scale factors apply to this entity.
        const DO_SCALING = 0x0001;
        /// Scale is derived from the scene's vanishing-point perspective.
        const GLOBAL_SCALING = 0x0002;
        /// Use the legacy cel-rect rule (one historical title only).
        const LEGACY_RECT = 0x0004;
    }
}

bitflags! {
    /// Screen channel selection for background save/restore.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ChannelMask: u8 {
        /// Visible pixel data.
        const VISUAL = 0x01;
        /// Priority (depth band) channel.
        const PRIORITY = 0x02;
        /// Control channel (occlusion markers, hot zones).
        const CONTROL = 0x04;
    }
}

impl ChannelMask {
    /// All three channels.
    pub const ALL: Self = Self::all();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_encoding_is_the_historical_one() {
        assert_eq!(Signal::STOP_UPDATE.bits(), 0x0001);
        assert_eq!(Signal::VIEW_UPDATED.bits(), 0x0002);
        assert_eq!(Signal::NO_UPDATE.bits(), 0x0004);
        assert_eq!(Signal::HIDDEN.bits(), 0x0008);
        assert_eq!(Signal::FIXED_PRIORITY.bits(), 0x0010);
        assert_eq!(Signal::ALWAYS_UPDATE.bits(), 0x0020);
        assert_eq!(Signal::FORCE_UPDATE.bits(), 0x0040);
        assert_eq!(Signal::REMOVE_VIEW.bits(), 0x0080);
        assert_eq!(Signal::FROZEN.bits(), 0x0100);
        assert_eq!(Signal::IGNORE_ACTOR.bits(), 0x4000);
        assert_eq!(Signal::DISPOSE_ME.bits(), 0x8000);
    }

    #[test]
    fn unknown_bits_survive_a_round_trip() {
        // Scripts use spare bits for their own bookkeeping; the engine must
        // carry them through untouched.
        let raw = 0x0804_u16;
        let signal = Signal::from_bits_retain(raw);
        assert_eq!(signal.bits(), raw);
        assert!(signal.contains(Signal::NO_UPDATE));
    }

    #[test]
    fn channel_mask_all_covers_three_channels() {
        assert_eq!(ChannelMask::ALL.bits(), 0x07);
    }
}
