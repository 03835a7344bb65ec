// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-line-per-entry cast dumps.

use std::io::Write;

use stagecast_core::CastEntry;

/// Writes human-readable cast-entry lines to a [`Write`](std::io::Write)
/// destination (default: stderr).
pub struct CastListing<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for CastListing<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CastListing").finish_non_exhaustive()
    }
}

impl CastListing {
    /// Creates a listing that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }
}

impl Default for CastListing {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write> CastListing<W> {
    /// Creates a listing that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one line per entry, in the order given (typically the sorted
    /// working cast or the last-cast snapshot).
    ///
    /// # Errors
    ///
    /// Propagates write failures from the destination.
    pub fn dump(&mut self, entries: &[CastEntry]) -> std::io::Result<()> {
        for entry in entries {
            writeln!(
                self.writer,
                "{:?} view {} ({}, {}), pal {}, at {}, {}, scale {}, {} / {:?} \
                 (z: {}, prio: {}, shown: {}, signal: {:?}, rect: {:?})",
                entry.entity,
                entry.view.0,
                entry.loop_no,
                entry.cel_no,
                entry.palette,
                entry.x,
                entry.y,
                entry.scale_x,
                entry.scale_y,
                entry.scale_signal,
                entry.z,
                entry.priority,
                entry.shown,
                entry.signal,
                entry.cel_rect,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stagecast_core::{EntityRef, Signal};

    use super::*;

    #[test]
    fn dump_writes_one_line_per_entry() {
        let mut a = CastEntry::new(EntityRef(4), 0);
        a.signal = Signal::NO_UPDATE;
        let b = CastEntry::new(EntityRef(9), 1);

        let mut out = Vec::new();
        CastListing::with_writer(&mut out).dump(&[a, b]).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("EntityRef(4)"));
        assert!(lines[0].contains("NO_UPDATE"));
        assert!(lines[1].contains("EntityRef(9)"));
    }
}
