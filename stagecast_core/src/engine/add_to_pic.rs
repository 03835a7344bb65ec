// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate drawing into the background picture.
//!
//! Entities added this way become part of the scenery: they are drawn once,
//! with no background save and no loop/cel fix-ups, and the picture is
//! marked invalid so the next cycle runs the show-pic transition.

use crate::entity::{CastListRef, EntityStore};
use crate::error::{AnimateError, Result};
use crate::screen::Screen;
use crate::signal::{ScaleSignal, Signal};
use crate::view::{CelSource, ViewId};

use super::geometry::apply_global_scaling;
use super::{priority_strip, Animator};

impl<S: Screen> Animator<S> {
    /// Draws a sorted cast list straight into the background picture.
    ///
    /// # Errors
    ///
    /// [`AnimateError::InvalidList`] if `list` does not resolve;
    /// [`AnimateError::DegenerateGeometry`] from global scaling.
    pub fn add_to_pic_list<E: EntityStore, V: CelSource>(
        &mut self,
        entities: &mut E,
        views: &V,
        screen: &mut S,
        list: CastListRef,
    ) -> Result<()> {
        if !entities.is_list(list) {
            return Err(AnimateError::InvalidList(list.0));
        }

        self.build_cast(entities, list);

        for i in 0..self.cast.len() {
            let entry = &mut self.cast[i];

            if entry.priority == -1 {
                entry.priority = screen.priority_for_y(entry.y);
            }

            if !views.is_scalable(entry.view) {
                entry.scale_signal = ScaleSignal::empty();
                entry.scale_x = 128;
                entry.scale_y = 128;
            }

            if entry.scale_signal.contains(ScaleSignal::DO_SCALING) {
                if entry.scale_signal.contains(ScaleSignal::GLOBAL_SCALING) {
                    apply_global_scaling(entry, entities, views, screen)?;
                }
                entry.cel_rect = views.cel_rect_scaled(
                    entry.view,
                    entry.loop_no,
                    entry.cel_no,
                    entry.x,
                    entry.y,
                    entry.z,
                    entry.scale_x,
                    entry.scale_y,
                );
                entities.set_ns_rect(entry.entity, entry.cel_rect);
            } else {
                entry.cel_rect = views.cel_rect(
                    entry.view,
                    entry.loop_no,
                    entry.cel_no,
                    entry.x,
                    entry.y,
                    entry.z,
                );
            }

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
            if !entry.signal.contains(Signal::IGNORE_ACTOR) {
                let strip = priority_strip(entry.cel_rect, screen.y_for_priority(entry.priority));
                screen.fill_control(strip, self.config.control_fill);
            }
        }

        self.mark_pic_not_valid(screen);
        Ok(())
    }

    /// Draws a single cel straight into the background picture.
    ///
    /// A `priority` of -1 is recomputed from `y`; a `control` of -1 skips
    /// the occlusion strip.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "control is a palette index carried in a signed property slot"
    )]
    pub fn add_to_pic_view<V: CelSource>(
        &mut self,
        views: &V,
        screen: &mut S,
        view: ViewId,
        loop_no: i16,
        cel_no: i16,
        x: i16,
        y: i16,
        priority: i16,
        control: i16,
    ) {
        let priority = if priority == -1 {
            screen.priority_for_y(y)
        } else {
            priority
        };

        let rect = views.cel_rect(view, loop_no, cel_no, x, y, 0);
        screen.draw_cel(view, loop_no, cel_no, rect, priority, 0, 128, 128);

        if control != -1 {
            let strip = priority_strip(rect, screen.y_for_priority(priority));
            screen.fill_control(strip, control as u8);
        }

        self.mark_pic_not_valid(screen);
    }

    /// Marks the picture invalid so the next cycle transitions it in. Early
    /// interpreter generations used the low invalidation value here.
    fn mark_pic_not_valid(&self, screen: &mut S) {
        let value = if self.config.early_pic_invalidate { 1 } else { 2 };
        screen.set_pic_not_valid(value);
    }
}
