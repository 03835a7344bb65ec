// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-entry geometry resolution and dirty classification (pass A).

use crate::cast::CastEntry;
use crate::config::AnimateConfig;
use crate::entity::{EntityStore, Prop};
use crate::error::{AnimateError, Result};
use crate::screen::Screen;
use crate::signal::{ScaleSignal, Signal};
use crate::view::CelSource;

use super::Animator;

impl<S: Screen> Animator<S> {
    /// Resolves each entry's indices, scale, rect, and priority, then
    /// classifies the frame's dirtiness (pass A).
    ///
    /// `dirty` is incremented once per entry whose signal state demands a
    /// screen update this cycle; the counter deliberately wraps like the
    /// byte it historically was.
    pub(super) fn resolve_and_classify<E: EntityStore, V: CelSource>(
        &mut self,
        entities: &mut E,
        views: &V,
        screen: &S,
        dirty: &mut u8,
    ) -> Result<()> {
        for entry in &mut self.cast {
            clamp_indices(entry, entities, views);
            resolve_scale(entry, entities, views, screen)?;
            resolve_cel_rect(&self.config, entry, entities, views);

            if !entry.signal.contains(Signal::FIXED_PRIORITY) {
                entry.priority = screen.priority_for_y(entry.y);
                entities.set(entry.entity, Prop::Priority, entry.priority);
            }

            if entry.signal.contains(Signal::NO_UPDATE) {
                if entry.signal.intersects(Signal::FORCE_UPDATE | Signal::VIEW_UPDATED)
                    || (entry.signal.contains(Signal::HIDDEN)
                        != entry.signal.contains(Signal::REMOVE_VIEW))
                    || entry.signal.contains(Signal::ALWAYS_UPDATE)
                {
                    *dirty = dirty.wrapping_add(1);
                }
                entry.signal.remove(Signal::STOP_UPDATE);
            } else {
                if entry.signal.intersects(Signal::STOP_UPDATE | Signal::ALWAYS_UPDATE) {
                    *dirty = dirty.wrapping_add(1);
                }
                entry.signal.remove(Signal::FORCE_UPDATE);
            }
        }
        Ok(())
    }
}

/// Normalizes out-of-range loop/cel indices.
///
/// The asymmetry is historical and load-bearing: an index at or above the
/// count resets to 0 and is written back to the entity, while a negative
/// index clamps to the last loop/cel without a writeback. Game content
/// depends on both halves (a knight with a nonexistent cel on one side, a
/// trunk keyed off a huge index read as negative on the other).
fn clamp_indices<E: EntityStore, V: CelSource>(
    entry: &mut CastEntry,
    entities: &mut E,
    views: &V,
) {
    let loop_count = views.loop_count(entry.view);
    if entry.loop_no >= loop_count {
        entry.loop_no = 0;
        entities.set(entry.entity, Prop::Loop, entry.loop_no);
    } else if entry.loop_no < 0 {
        entry.loop_no = loop_count - 1;
    }

    let cel_count = views.cel_count(entry.view, entry.loop_no);
    if entry.cel_no >= cel_count {
        entry.cel_no = 0;
        entities.set(entry.entity, Prop::Cel, entry.cel_no);
    } else if entry.cel_no < 0 {
        entry.cel_no = cel_count - 1;
    }
}

/// Applies the non-scalable override and, if requested, global perspective
/// scaling.
fn resolve_scale<E: EntityStore, V: CelSource, S: Screen>(
    entry: &mut CastEntry,
    entities: &mut E,
    views: &V,
    screen: &S,
) -> Result<()> {
    if !views.is_scalable(entry.view) {
        // Some views are authored to always render at 100%, whatever the
        // entity's scale state says.
        entry.scale_signal = ScaleSignal::empty();
        entry.scale_x = 128;
        entry.scale_y = 128;
    } else if entry
        .scale_signal
        .contains(ScaleSignal::DO_SCALING | ScaleSignal::GLOBAL_SCALING)
    {
        apply_global_scaling(entry, entities, views, screen)?;
    }
    Ok(())
}

/// Derives both scale factors from the scene's vanishing-point perspective
/// and writes them back to the entity.
///
/// Degenerate geometry errors out before any write happens.
pub(super) fn apply_global_scaling<E: EntityStore, V: CelSource, S: Screen>(
    entry: &mut CastEntry,
    entities: &mut E,
    views: &V,
    screen: &S,
) -> Result<()> {
    let max_scale = entities.get(entry.entity, Prop::MaxScale);
    let cel_height = views.cel_height(entry.view, entry.loop_no, entry.cel_no);
    let vanishing_y = entities.vanishing_y();
    let span = screen.view_port().bottom - vanishing_y;

    let Some(scale) = perspective_scale(max_scale, cel_height, entry.y, vanishing_y, span) else {
        return Err(AnimateError::DegenerateGeometry {
            view: entry.view,
            loop_no: entry.loop_no,
            cel_no: entry.cel_no,
            cel_height,
            span,
        });
    };

    entry.scale_y = scale;
    entry.scale_x = scale;
    entities.set(entry.entity, Prop::ScaleX, entry.scale_x);
    entities.set(entry.entity, Prop::ScaleY, entry.scale_y);
    Ok(())
}

/// The perspective scale formula, in exact widened-integer math.
///
/// All intermediates widen to `i32` and the result truncates back to `i16`,
/// matching the historical register behavior. An entity standing on the
/// vanishing line gets a span of 1 rather than 0. Returns `None` for the
/// degenerate cases (zero cel height or a viewport bottom on the vanishing
/// line).
#[allow(
    clippy::cast_possible_truncation,
    reason = "truncation to i16 replicates the historical fixed-point math"
)]
fn perspective_scale(
    max_scale: i16,
    cel_height: i16,
    entry_y: i16,
    vanishing_y: i16,
    span: i16,
) -> Option<i16> {
    let max_cel_height = ((i32::from(max_scale) * i32::from(cel_height)) >> 7) as i16;
    let mut entry_span = entry_y - vanishing_y;
    if entry_span == 0 {
        entry_span = 1;
    }

    if cel_height == 0 || span == 0 {
        return None;
    }

    let scale_y = (i32::from(max_cel_height) * i32::from(entry_span)) / i32::from(span);
    let scale_y = (scale_y * 128) / i32::from(cel_height);
    Some(scale_y as i16)
}

/// Computes the entry's on-screen rect and publishes it to the external
/// compare subsystem when appropriate.
fn resolve_cel_rect<E: EntityStore, V: CelSource>(
    config: &AnimateConfig,
    entry: &mut CastEntry,
    entities: &mut E,
    views: &V,
) {
    let mut publish = true;

    if entry.scale_signal.contains(ScaleSignal::DO_SCALING) {
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
        // A scaled entry that will not be drawn must not publish its rect,
        // or off-screen actors start colliding at stale positions.
        if entry.signal.contains(Signal::HIDDEN)
            && !entry.signal.contains(Signal::ALWAYS_UPDATE)
        {
            publish = false;
        }
    } else if config.legacy_cel_rect && entry.scale_signal.contains(ScaleSignal::LEGACY_RECT) {
        let base = entities.ns_rect(entry.entity);
        entry.cel_rect = views.cel_rect_legacy(
            entry.view,
            entry.loop_no,
            entry.cel_no,
            entry.x,
            entry.y,
            entry.z,
            base,
        );
        publish = false;
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

    if publish {
        entities.set_ns_rect(entry.entity, entry.cel_rect);
    }
}
