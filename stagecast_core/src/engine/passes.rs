// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The signal-machine update passes and the final draw pass.
//!
//! Pass order is observable through the screen call sequence and must not be
//! rearranged. The reverse walk of pass B restores overlapping backgrounds
//! in the opposite order of their saves; passes C, D, and the final draw run
//! forward so later (higher-priority) entries paint over earlier ones.

use crate::backdrop::BackdropHandle;
use crate::entity::EntityStore;
use crate::screen::Screen;
use crate::signal::{ChannelMask, Signal};

use super::{priority_strip, Animator};

impl<S: Screen> Animator<S> {
    /// Runs passes B through D over the sorted cast.
    ///
    /// Only called when pass A found the frame dirty.
    pub(super) fn update<E: EntityStore>(&mut self, entities: &mut E, screen: &mut S) {
        // Pass B, reverse order: reconcile entries already in no-update
        // state, and move stop-update entries into it.
        for i in (0..self.cast.len()).rev() {
            let entry = &mut self.cast[i];
            if entry.signal.contains(Signal::NO_UPDATE) {
                if !entry.signal.contains(Signal::REMOVE_VIEW) {
                    let handle = entities.under_bits(entry.entity);
                    if screen.pic_not_valid() != 1 {
                        self.backdrops.restore(screen, handle);
                        entry.shown = true;
                    } else {
                        // The whole picture is being replaced; putting the
                        // old pixels back would be wasted work.
                        self.backdrops.free(handle);
                    }
                    entities.set_under_bits(entry.entity, BackdropHandle::NONE);
                }
                entry.signal.remove(Signal::FORCE_UPDATE);
                if entry.signal.contains(Signal::VIEW_UPDATED) {
                    entry.signal.remove(Signal::VIEW_UPDATED | Signal::NO_UPDATE);
                }
            } else if entry.signal.contains(Signal::STOP_UPDATE) {
                entry.signal.remove(Signal::STOP_UPDATE);
                entry.signal.insert(Signal::NO_UPDATE);
            }
        }

        // Pass C, forward order: always-update entries draw unconditionally.
        for entry in &mut self.cast {
            if entry.signal.contains(Signal::ALWAYS_UPDATE) {
                screen.draw_cel(
                    entry.view,
                    entry.loop_no,
                    entry.cel_no,
                    entry.cel_rect,
                    entry.priority,
                    entry.palette,
                    entry.scale_x,
                    entry.scale_y,
                );
                entry.shown = true;
                entry.signal.remove(
                    Signal::STOP_UPDATE
                        | Signal::VIEW_UPDATED
                        | Signal::NO_UPDATE
                        | Signal::FORCE_UPDATE,
                );
                if !entry.signal.contains(Signal::IGNORE_ACTOR) {
                    let strip =
                        priority_strip(entry.cel_rect, screen.y_for_priority(entry.priority));
                    screen.fill_control(strip, self.config.control_fill);
                }
            }
        }

        // Pass D, first half: save the background under every no-update
        // entry that will actually stay on screen.
        for i in 0..self.cast.len() {
            let entry = &mut self.cast[i];
            if entry.signal.contains(Signal::NO_UPDATE) {
                if entry.signal.contains(Signal::HIDDEN) {
                    entry.signal.insert(Signal::REMOVE_VIEW);
                } else {
                    entry.signal.remove(Signal::REMOVE_VIEW);
                    let mask = if entry.signal.contains(Signal::IGNORE_ACTOR) {
                        ChannelMask::VISUAL | ChannelMask::PRIORITY
                    } else {
                        ChannelMask::ALL
                    };
                    let handle = self.backdrops.save(&*screen, entry.cel_rect, mask);
                    entities.set_under_bits(entry.entity, handle);
                }
            }
        }

        // Pass D, second half: draw the no-update entries.
        for entry in &mut self.cast {
            if entry.signal.contains(Signal::NO_UPDATE) && !entry.signal.contains(Signal::HIDDEN)
            {
                screen.draw_cel(
                    entry.view,
                    entry.loop_no,
                    entry.cel_no,
                    entry.cel_rect,
                    entry.priority,
                    entry.palette,
                    entry.scale_x,
                    entry.scale_y,
                );
                entry.shown = true;
                if !entry.signal.contains(Signal::IGNORE_ACTOR) {
                    let strip =
                        priority_strip(entry.cel_rect, screen.y_for_priority(entry.priority));
                    screen.fill_control(strip, self.config.control_fill);
                }
            }
        }
    }

    /// Final draw pass: entries in the ordinary updating state save their
    /// background, draw, and join the last-cast snapshot.
    pub(super) fn draw_cels<E: EntityStore>(&mut self, entities: &mut E, screen: &mut S) {
        self.last_cast.clear();

        for i in 0..self.cast.len() {
            let entry = &mut self.cast[i];
            if !entry
                .signal
                .intersects(Signal::NO_UPDATE | Signal::HIDDEN | Signal::ALWAYS_UPDATE)
            {
                let handle = self.backdrops.save(&*screen, entry.cel_rect, ChannelMask::ALL);
                entities.set_under_bits(entry.entity, handle);

                screen.draw_cel(
                    entry.view,
                    entry.loop_no,
                    entry.cel_no,
                    entry.cel_rect,
                    entry.priority,
                    entry.palette,
                    entry.scale_x,
                    entry.scale_y,
                );
                entry.shown = true;
                entry.signal.remove(Signal::REMOVE_VIEW);

                self.last_cast.push(entry.clone());
            }
        }
    }
}
