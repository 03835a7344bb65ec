// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scriptable in-memory entity store.

use stagecast_core::{
    BackdropHandle, CastListRef, CastNode, EntityRef, EntityStore, NodeRef, Prop, Rect,
};

const PROP_COUNT: usize = 17;

const fn prop_index(prop: Prop) -> usize {
    prop as usize
}

/// What an entity's update callback does when invoked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateScript {
    /// Do nothing (the common case).
    #[default]
    None,
    /// Overwrite the entity's own signal property.
    SetSignal(u16),
    /// Delete the entity's own cast-list node, ending traversal at it.
    DeleteOwnNode,
    /// Raise the engine-abort flag.
    TriggerAbort,
    /// Raise the fast-cast gate.
    RaiseFastCast,
}

#[derive(Clone, Debug)]
struct EntityCell {
    props: [i16; PROP_COUNT],
    under_bits: BackdropHandle,
    ns_rect: Rect,
    script: UpdateScript,
}

#[derive(Clone, Copy, Debug)]
struct NodeSlot {
    generation: u16,
    /// Entity and successor; `None` once the node has been deleted.
    live: Option<(EntityRef, Option<NodeRef>)>,
}

const fn pack_node(idx: u16, generation: u16) -> NodeRef {
    NodeRef(((generation as u32) << 16) | (idx as u32 + 1))
}

const fn node_slot(node: NodeRef) -> usize {
    (node.0 & 0xFFFF) as usize - 1
}

const fn node_generation(node: NodeRef) -> u16 {
    (node.0 >> 16) as u16
}

/// In-memory [`EntityStore`] with observable writes and scriptable
/// callbacks.
///
/// Every property write is appended to a log, so tests can distinguish a
/// value the engine merely normalized in its working copy from one it wrote
/// back to the entity. Nodes live in a generation-checked arena; deleting a
/// node invalidates its address exactly the way a reallocating object table
/// would.
#[derive(Debug, Default)]
pub struct SimEntityStore {
    entities: Vec<EntityCell>,
    nodes: Vec<NodeSlot>,
    lists: Vec<Option<NodeRef>>,
    write_log: Vec<(EntityRef, Prop, i16)>,
    update_log: Vec<EntityRef>,
    dispose_log: Vec<EntityRef>,
    vanishing_y: i16,
    abort_flag: bool,
    fast_cast_flag: bool,
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "sim arenas are tiny; indices fit the packed handle fields"
)]
impl SimEntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity with all properties zeroed and returns its reference.
    pub fn add_entity(&mut self) -> EntityRef {
        self.entities.push(EntityCell {
            props: [0; PROP_COUNT],
            under_bits: BackdropHandle::NONE,
            ns_rect: Rect::EMPTY,
            script: UpdateScript::None,
        });
        EntityRef((self.entities.len() - 1) as u32)
    }

    /// Adds an entity with the given view/position properties.
    pub fn add_actor(&mut self, view: i16, x: i16, y: i16) -> EntityRef {
        let entity = self.add_entity();
        self.put(entity, Prop::View, view);
        self.put(entity, Prop::X, x);
        self.put(entity, Prop::Y, y);
        entity
    }

    /// Writes a property without logging (test setup, not engine behavior).
    pub fn put(&mut self, entity: EntityRef, prop: Prop, value: i16) {
        self.entities[entity.0 as usize].props[prop_index(prop)] = value;
    }

    /// Reads a property directly (equivalent to [`EntityStore::get`]).
    #[must_use]
    pub fn peek(&self, entity: EntityRef, prop: Prop) -> i16 {
        self.entities[entity.0 as usize].props[prop_index(prop)]
    }

    /// Assigns the entity's update-callback script.
    pub fn set_script(&mut self, entity: EntityRef, script: UpdateScript) {
        self.entities[entity.0 as usize].script = script;
    }

    /// Sets the scene's vanishing-point y coordinate.
    pub fn set_vanishing_y(&mut self, y: i16) {
        self.vanishing_y = y;
    }

    /// Raises or clears the engine-abort flag.
    pub fn set_abort(&mut self, abort: bool) {
        self.abort_flag = abort;
    }

    /// Raises or clears the fast-cast gate.
    pub fn set_fast_cast(&mut self, active: bool) {
        self.fast_cast_flag = active;
    }

    /// Builds a cast list over `entities` in order and returns its
    /// reference.
    pub fn make_list(&mut self, entities: &[EntityRef]) -> CastListRef {
        let mut head = None;
        for &entity in entities.iter().rev() {
            let idx = self.nodes.len() as u16;
            self.nodes.push(NodeSlot {
                generation: 0,
                live: Some((entity, head)),
            });
            head = Some(pack_node(idx, 0));
        }
        self.lists.push(head);
        CastListRef((self.lists.len() - 1) as u32)
    }

    /// Returns the node currently carrying `entity`, if any.
    #[must_use]
    pub fn node_of(&self, entity: EntityRef) -> Option<NodeRef> {
        for (idx, slot) in self.nodes.iter().enumerate() {
            if let Some((value, _)) = slot.live {
                if value == entity {
                    return Some(pack_node(idx as u16, slot.generation));
                }
            }
        }
        None
    }

    /// Deletes a node: unlinks it from every list head or predecessor and
    /// bumps its generation so the old address stops resolving.
    pub fn delete_node(&mut self, node: NodeRef) {
        let idx = node_slot(node);
        let Some((_, succ)) = self.nodes[idx].live else {
            return;
        };

        for head in &mut self.lists {
            if *head == Some(node) {
                *head = succ;
            }
        }
        for slot in &mut self.nodes {
            if let Some((value, next)) = slot.live {
                if next == Some(node) {
                    slot.live = Some((value, succ));
                }
            }
        }

        self.nodes[idx].live = None;
        self.nodes[idx].generation = self.nodes[idx].generation.wrapping_add(1);
    }

    /// All engine-performed property writes, in order.
    #[must_use]
    pub fn write_log(&self) -> &[(EntityRef, Prop, i16)] {
        &self.write_log
    }

    /// Number of engine writes to one property of one entity.
    #[must_use]
    pub fn writes_to(&self, entity: EntityRef, prop: Prop) -> usize {
        self.write_log
            .iter()
            .filter(|(e, p, _)| *e == entity && *p == prop)
            .count()
    }

    /// Entities whose update callback ran, in invocation order.
    #[must_use]
    pub fn update_log(&self) -> &[EntityRef] {
        &self.update_log
    }

    /// Entities whose dispose callback ran, in invocation order.
    #[must_use]
    pub fn dispose_log(&self) -> &[EntityRef] {
        &self.dispose_log
    }

    /// Clears the write/update/dispose logs (between setup and the cycle
    /// under test).
    pub fn clear_logs(&mut self) {
        self.write_log.clear();
        self.update_log.clear();
        self.dispose_log.clear();
    }
}

impl EntityStore for SimEntityStore {
    fn get(&self, entity: EntityRef, prop: Prop) -> i16 {
        self.entities[entity.0 as usize].props[prop_index(prop)]
    }

    fn set(&mut self, entity: EntityRef, prop: Prop, value: i16) {
        self.entities[entity.0 as usize].props[prop_index(prop)] = value;
        self.write_log.push((entity, prop, value));
    }

    fn under_bits(&self, entity: EntityRef) -> BackdropHandle {
        self.entities[entity.0 as usize].under_bits
    }

    fn set_under_bits(&mut self, entity: EntityRef, handle: BackdropHandle) {
        self.entities[entity.0 as usize].under_bits = handle;
    }

    fn ns_rect(&self, entity: EntityRef) -> Rect {
        self.entities[entity.0 as usize].ns_rect
    }

    fn set_ns_rect(&mut self, entity: EntityRef, rect: Rect) {
        self.entities[entity.0 as usize].ns_rect = rect;
    }

    fn vanishing_y(&self) -> i16 {
        self.vanishing_y
    }

    fn is_list(&self, list: CastListRef) -> bool {
        (list.0 as usize) < self.lists.len()
    }

    fn list_head(&self, list: CastListRef) -> Option<NodeRef> {
        self.lists.get(list.0 as usize).copied().flatten()
    }

    fn node(&self, node: NodeRef) -> Option<CastNode> {
        let slot = self.nodes.get(node_slot(node))?;
        if slot.generation != node_generation(node) {
            return None;
        }
        let (entity, next) = slot.live?;
        Some(CastNode { entity, next })
    }

    fn invoke_update(&mut self, entity: EntityRef) {
        log::trace!(
            "update callback for {entity:?}: {:?}",
            self.entities[entity.0 as usize].script
        );
        self.update_log.push(entity);
        match self.entities[entity.0 as usize].script {
            UpdateScript::None => {}
            UpdateScript::SetSignal(bits) => {
                self.put(entity, Prop::Signal, bits as i16);
            }
            UpdateScript::DeleteOwnNode => {
                if let Some(node) = self.node_of(entity) {
                    self.delete_node(node);
                }
            }
            UpdateScript::TriggerAbort => self.abort_flag = true,
            UpdateScript::RaiseFastCast => self.fast_cast_flag = true,
        }
    }

    fn invoke_dispose(&mut self, entity: EntityRef) {
        self.dispose_log.push(entity);
    }

    fn abort_in_progress(&self) -> bool {
        self.abort_flag
    }

    fn fast_cast_active(&self) -> bool {
        self.fast_cast_flag
    }
}
