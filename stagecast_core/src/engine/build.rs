// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cast list snapshot.

use crate::cast::{sort_back_to_front, CastEntry};
use crate::entity::{CastListRef, EntityStore, Prop};
use crate::screen::Screen;
use crate::signal::{ScaleSignal, Signal};
use crate::view::ViewId;

use super::Animator;

impl<S: Screen> Animator<S> {
    /// Snapshots the external list into the working cast and sorts it
    /// back-to-front.
    ///
    /// One entry is produced per surviving node, in traversal order; that
    /// order is recorded on each entry as the sort tie-break. Scale fields
    /// stay at 100% unless the configuration supports scaling and the entity
    /// requests it.
    pub(super) fn build_cast<E: EntityStore>(&mut self, entities: &E, list: CastListRef) {
        self.cast.clear();
        self.last_cast.clear();

        let mut cursor = entities.list_head(list);
        let mut order: u16 = 0;
        while let Some(addr) = cursor {
            let Some(node) = entities.node(addr) else {
                break;
            };
            let entity = node.entity;

            let mut entry = CastEntry::new(entity, order);
            order += 1;
            entry.view = ViewId(entities.get(entity, Prop::View));
            entry.loop_no = entities.get(entity, Prop::Loop);
            entry.cel_no = entities.get(entity, Prop::Cel);
            entry.palette = entities.get(entity, Prop::Palette);
            entry.x = entities.get(entity, Prop::X);
            entry.y = entities.get(entity, Prop::Y);
            entry.z = entities.get(entity, Prop::Z);
            entry.priority = entities.get(entity, Prop::Priority);
            entry.signal = Signal::from_bits_retain(entities.get(entity, Prop::Signal) as u16);
            if self.config.scaling_supported {
                entry.scale_signal =
                    ScaleSignal::from_bits_retain(entities.get(entity, Prop::ScaleSignal) as u16);
                if entry.scale_signal.contains(ScaleSignal::DO_SCALING) {
                    entry.scale_x = entities.get(entity, Prop::ScaleX);
                    entry.scale_y = entities.get(entity, Prop::ScaleY);
                }
            }

            self.cast.push(entry);
            cursor = node.next;
        }

        sort_back_to_front(&mut self.cast);
    }
}
