// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation cycle.
//!
//! [`Animator`] turns one external trigger into one rendered frame:
//!
//! ```text
//!   cast list ──► build_cast() ──► sorted Vec<CastEntry>
//!                                       │
//!                 resolve_and_classify()│  geometry + pass A
//!                                       ▼
//!                 update() ── passes B/C/D (signal machine, backdrops)
//!                                       │
//!                 draw_cels() ── final draw pass, last-cast snapshot
//!                                       │
//!                 update_screen() ── minimal dirty-region flush
//!                                       │
//!                 restore_and_delete() ── signal writeback, disposal
//! ```
//!
//! The pass bodies live in sibling files (`build`, `geometry`, `passes`,
//! `commit`, `add_to_pic`); this file owns the orchestration, the update
//! callback walk, and the end-of-cycle writeback.

mod add_to_pic;
mod build;
mod commit;
mod geometry;
mod passes;

use core::fmt;

use log::{debug, trace};

use crate::backdrop::{BackdropHandle, BackdropStore};
use crate::cast::CastEntry;
use crate::config::AnimateConfig;
use crate::entity::{CastListRef, EntityStore, Prop};
use crate::error::{AnimateError, Result};
use crate::rect::Rect;
use crate::screen::Screen;
use crate::signal::Signal;
use crate::view::CelSource;

/// Outcome of the update-callback walk.
enum CycleControl {
    /// All callbacks ran; continue with the cycle.
    Proceed,
    /// The fast-cast gate is set; skip the whole cycle.
    FastCast,
    /// The engine reported an abort mid-walk; abandon the cycle.
    Aborted,
}

/// The cast animation engine.
///
/// One instance serves one hosted game. All collaborator state (entities,
/// sprite metadata, the screen) is owned by the surrounding application and
/// passed into each call; the animator owns only its per-cycle working cast,
/// the persisted last-cast snapshot, and the parked backgrounds.
pub struct Animator<S: Screen> {
    config: AnimateConfig,
    cast: Vec<CastEntry>,
    last_cast: Vec<CastEntry>,
    backdrops: BackdropStore<S::Saved>,
}

impl<S: Screen> fmt::Debug for Animator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("config", &self.config)
            .field("cast", &self.cast.len())
            .field("last_cast", &self.last_cast.len())
            .field("backdrops", &self.backdrops)
            .finish()
    }
}

impl<S: Screen> Animator<S> {
    /// Creates an animator for the given capability configuration.
    #[must_use]
    pub fn new(config: AnimateConfig) -> Self {
        Self {
            config,
            cast: Vec::new(),
            last_cast: Vec::new(),
            backdrops: BackdropStore::new(),
        }
    }

    /// The active capability configuration.
    #[must_use]
    pub fn config(&self) -> &AnimateConfig {
        &self.config
    }

    /// The working cast of the most recent cycle, in draw order.
    #[must_use]
    pub fn cast(&self) -> &[CastEntry] {
        &self.cast
    }

    /// The persisted snapshot of the most recently drawn cast.
    #[must_use]
    pub fn last_cast(&self) -> &[CastEntry] {
        &self.last_cast
    }

    /// The parked-background store.
    #[must_use]
    pub fn backdrops(&self) -> &BackdropStore<S::Saved> {
        &self.backdrops
    }

    /// Runs one animation cycle.
    ///
    /// With `list` of `None` the last-cast snapshot is disposed and, if the
    /// picture is invalid, the show-pic transition runs; nothing is
    /// animated. With `cycle` set, every non-frozen entity's update callback
    /// is invoked before the cast is built; a fast-cast gate or an engine
    /// abort during that walk abandons the cycle with `Ok(())`.
    ///
    /// # Errors
    ///
    /// [`AnimateError::InvalidList`] if `list` does not resolve to a cast
    /// list; [`AnimateError::DegenerateGeometry`] from global scaling.
    pub fn animate<E: EntityStore, V: CelSource>(
        &mut self,
        entities: &mut E,
        views: &V,
        screen: &mut S,
        list: Option<CastListRef>,
        cycle: bool,
    ) -> Result<()> {
        let old_pic_not_valid = screen.pic_not_valid();

        let Some(list) = list else {
            self.dispose_last_cast();
            if screen.pic_not_valid() != 0 {
                Self::show_pic(screen);
            }
            return Ok(());
        };

        if !entities.is_list(list) {
            return Err(AnimateError::InvalidList(list.0));
        }

        if cycle {
            match self.invoke_cast(entities, list) {
                CycleControl::Proceed => {}
                CycleControl::FastCast => {
                    debug!("animation cycle skipped: fast-cast gate active");
                    return Ok(());
                }
                CycleControl::Aborted => {
                    debug!("animation cycle abandoned: engine abort in progress");
                    return Ok(());
                }
            }
        }

        self.dispose_last_cast();
        self.build_cast(entities, list);

        let mut dirty = old_pic_not_valid;
        self.resolve_and_classify(entities, views, screen, &mut dirty)?;

        if dirty != 0 {
            if self.config.update_guard {
                screen.begin_update();
            }
            self.update(entities, screen);
            if self.config.update_guard {
                screen.end_update();
            }
        }

        self.draw_cels(entities, screen);

        if screen.pic_not_valid() != 0 {
            Self::show_pic(screen);
        }

        self.update_screen(entities, screen, dirty);
        self.restore_and_delete(entities, screen);

        trace!(
            "cycle complete: {} cast entries, dirty counter {}",
            self.cast.len(),
            dirty
        );
        Ok(())
    }

    /// Drops the persisted last-cast snapshot.
    pub fn dispose_last_cast(&mut self) {
        self.last_cast.clear();
    }

    /// Invokes update callbacks along the list, re-resolving nodes after
    /// every callback.
    fn invoke_cast<E: EntityStore>(&self, entities: &mut E, list: CastListRef) -> CycleControl {
        let mut cursor = entities.list_head(list);
        while let Some(addr) = cursor {
            let Some(node) = entities.node(addr) else {
                break;
            };

            if self.config.fast_cast && entities.fast_cast_active() {
                // A set gate means an overlay owns the screen; animating
                // now would paint cels into it.
                return CycleControl::FastCast;
            }

            let signal = Signal::from_bits_retain(entities.get(node.entity, Prop::Signal) as u16);
            if signal.contains(Signal::FROZEN) {
                cursor = node.next;
                continue;
            }

            entities.invoke_update(node.entity);
            if entities.abort_in_progress() {
                return CycleControl::Aborted;
            }

            // The callback may have deleted or reallocated the node; only a
            // fresh resolution of its address can be trusted. A vanished
            // node ends the walk.
            match entities.node(addr) {
                Some(fresh) => cursor = fresh.next,
                None => break,
            }
        }
        CycleControl::Proceed
    }

    /// Writes mutated signals back, restores backgrounds of retired
    /// entries, and runs dispose callbacks.
    fn restore_and_delete<E: EntityStore>(&mut self, entities: &mut E, screen: &mut S) {
        // Writeback happens in its own loop first: a dispose callback can
        // rewrite another entity's signal, which a later writeback from our
        // stale copy would clobber.
        for entry in &self.cast {
            entities.set(entry.entity, Prop::Signal, entry.signal.bits() as i16);
        }

        for i in (0..self.cast.len()).rev() {
            let entry = &mut self.cast[i];
            // Re-read: the writeback loop or an earlier dispose may have
            // changed it since our copy was taken.
            entry.signal =
                Signal::from_bits_retain(entities.get(entry.entity, Prop::Signal) as u16);

            if !entry.signal.intersects(Signal::NO_UPDATE | Signal::REMOVE_VIEW) {
                let handle = entities.under_bits(entry.entity);
                self.backdrops.restore(screen, handle);
                entities.set_under_bits(entry.entity, BackdropHandle::NONE);
            }

            if entry.signal.contains(Signal::DISPOSE_ME) {
                entities.invoke_dispose(entry.entity);
            }
        }
    }

    /// Runs the external transition over the viewport, with the cursor
    /// parked out of the way.
    fn show_pic(screen: &mut S) {
        let port = screen.view_port();
        let cursor_was_visible = screen.cursor_visible();
        if cursor_was_visible {
            screen.hide_cursor();
        }
        screen.transition(port);
        if cursor_was_visible {
            screen.show_cursor();
        }
    }
}

/// Narrows `rect` to the one-row-or-more strip at the priority band's top
/// edge, clamped inside the rect.
pub(crate) fn priority_strip(rect: Rect, band_top: i16) -> Rect {
    if rect.is_empty() {
        return rect;
    }
    let mut strip = rect;
    strip.top = (band_top - 1).clamp(rect.top, rect.bottom - 1);
    strip
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_strip_clamps_into_rect() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(priority_strip(r, 35).top, 34);
        assert_eq!(priority_strip(r, 5).top, 20);
        assert_eq!(priority_strip(r, 100).top, 39);
        assert_eq!(priority_strip(r, 35).bottom, 40);
    }

    #[test]
    fn priority_strip_leaves_empty_rects_alone() {
        let r = Rect::new(10, 20, 10, 20);
        assert_eq!(priority_strip(r, 35), r);
    }
}
