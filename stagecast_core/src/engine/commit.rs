// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-region flush and the last-cast replay.

use crate::backdrop::BackdropHandle;
use crate::entity::{EntityStore, Prop};
use crate::rect::Rect;
use crate::screen::Screen;
use crate::signal::{ChannelMask, Signal};

use super::Animator;

impl<S: Screen> Animator<S> {
    /// Flushes the minimal changed region per entry to the visible
    /// framebuffer and rolls each entity's last-shown rect forward.
    ///
    /// An entry participates if it was shown this cycle, or if it is not
    /// being removed and is either updating normally or parked while the
    /// whole picture was invalid. When the old and new rects overlap, one
    /// flush of their union suffices; when the entity jumped, the old rect
    /// is flushed first and the new one separately.
    pub(super) fn update_screen<E: EntityStore>(
        &mut self,
        entities: &mut E,
        screen: &mut S,
        old_pic_not_valid: u8,
    ) {
        for entry in &mut self.cast {
            let participates = entry.shown
                || (!entry.signal.contains(Signal::REMOVE_VIEW)
                    && (!entry.signal.contains(Signal::NO_UPDATE) || old_pic_not_valid != 0));
            if !participates {
                continue;
            }

            let last_shown = Rect::new(
                entities.get(entry.entity, Prop::LsLeft),
                entities.get(entry.entity, Prop::LsTop),
                entities.get(entry.entity, Prop::LsRight),
                entities.get(entry.entity, Prop::LsBottom),
            );

            let flush = if !last_shown.clip(entry.cel_rect).is_empty() {
                last_shown.extend(entry.cel_rect)
            } else {
                screen.show(last_shown);
                entry.cel_rect
            };

            entities.set(entry.entity, Prop::LsLeft, entry.cel_rect.left);
            entities.set(entry.entity, Prop::LsTop, entry.cel_rect.top);
            entities.set(entry.entity, Prop::LsRight, entry.cel_rect.right);
            entities.set(entry.entity, Prop::LsBottom, entry.cel_rect.bottom);
            screen.show(flush);

            if entry.signal.contains(Signal::HIDDEN) {
                entry.signal.insert(Signal::REMOVE_VIEW);
            }
        }
    }

    /// Replays the last-cast snapshot over `rect` and presents it.
    ///
    /// Each entry saves its region and redraws its cel in forward order;
    /// after one flush of the whole rect, the saved regions are restored in
    /// strict reverse order. Used when an overlay (dialog, menu) needs to
    /// briefly uncover and then re-cover the scene.
    pub fn reanimate(&mut self, screen: &mut S, rect: Rect) {
        if self.last_cast.is_empty() {
            screen.show(rect);
            return;
        }

        for i in 0..self.last_cast.len() {
            let entry = &mut self.last_cast[i];
            entry.backdrop = self.backdrops.save(
                &*screen,
                entry.cel_rect,
                ChannelMask::VISUAL | ChannelMask::PRIORITY,
            );
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
        }

        screen.show(rect);

        for i in (0..self.last_cast.len()).rev() {
            let entry = &mut self.last_cast[i];
            let handle = entry.backdrop;
            entry.backdrop = BackdropHandle::NONE;
            self.backdrops.restore(screen, handle);
        }
    }
}
