// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! External entity store contract.
//!
//! The scripting/object system owns the entities being animated. This core
//! never holds onto entity memory; it reads and writes a fixed set of named
//! properties through [`EntityStore`] and treats every id as opaque. The
//! pervasive read-mutate-write-back pattern replaces field access on a
//! polymorphic scripted object.
//!
//! # Node invalidation
//!
//! The cast list is an externally owned forward list whose nodes may be
//! deleted or reallocated whenever an update callback runs. Resolution is
//! therefore fallible by design: [`EntityStore::node`] returns `None` for a
//! node that no longer exists, and callers must re-resolve by [`NodeRef`]
//! after every callback instead of caching anything across one.

use core::fmt;

use crate::backdrop::BackdropHandle;
use crate::rect::Rect;

/// Opaque reference to an entity in the external object store.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef(pub u32);

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef({})", self.0)
    }
}

/// Opaque address of one node in an external cast list.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub u32);

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", self.0)
    }
}

/// Opaque reference to an external cast list.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastListRef(pub u32);

impl fmt::Debug for CastListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastListRef({})", self.0)
    }
}

/// A resolved cast-list node: the entity it carries and its successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastNode {
    /// The entity this node refers to.
    pub entity: EntityRef,
    /// Address of the next node, if any.
    pub next: Option<NodeRef>,
}

/// Named small-integer properties of an animated entity.
///
/// `LsLeft`..`LsBottom` persist the entity's last-shown screen rectangle
/// between cycles for the dirty-region committer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Sprite resource id.
    View,
    /// Loop index within the view.
    Loop,
    /// Cel index within the loop.
    Cel,
    /// Palette variant.
    Palette,
    /// Screen x position.
    X,
    /// Screen y position.
    Y,
    /// Depth/height offset (not combined with priority).
    Z,
    /// Draw priority band.
    Priority,
    /// Animation signal bits (see [`Signal`](crate::Signal)).
    Signal,
    /// Scaling flags (see [`ScaleSignal`](crate::ScaleSignal)).
    ScaleSignal,
    /// Horizontal scale factor, fixed-point 128 = 100%.
    ScaleX,
    /// Vertical scale factor, fixed-point 128 = 100%.
    ScaleY,
    /// Maximum scale percentage for global scaling.
    MaxScale,
    /// Last shown rect, left edge.
    LsLeft,
    /// Last shown rect, top edge.
    LsTop,
    /// Last shown rect, right edge.
    LsRight,
    /// Last shown rect, bottom edge.
    LsBottom,
}

/// Access to the externally owned entity/object store.
///
/// Property writes must always be performed; implementations may not assume
/// the engine skips writes of unchanged values.
pub trait EntityStore {
    /// Reads a property value.
    fn get(&self, entity: EntityRef, prop: Prop) -> i16;

    /// Writes a property value.
    fn set(&mut self, entity: EntityRef, prop: Prop, value: i16);

    /// Returns the entity's parked-background handle.
    fn under_bits(&self, entity: EntityRef) -> BackdropHandle;

    /// Stores the entity's parked-background handle.
    fn set_under_bits(&mut self, entity: EntityRef, handle: BackdropHandle);

    /// Returns the entity's rect as known to the compare/collision
    /// subsystem.
    fn ns_rect(&self, entity: EntityRef) -> Rect;

    /// Publishes the entity's rect to the compare/collision subsystem.
    fn set_ns_rect(&mut self, entity: EntityRef, rect: Rect);

    /// Returns the current scene's vanishing-point y coordinate.
    fn vanishing_y(&self) -> i16;

    /// Returns whether `list` resolves to a valid cast list.
    fn is_list(&self, list: CastListRef) -> bool;

    /// Returns the address of the first node of `list`, if any.
    fn list_head(&self, list: CastListRef) -> Option<NodeRef>;

    /// Resolves a node address.
    ///
    /// Returns `None` when the node has been deleted or reallocated since
    /// the address was obtained; traversal must stop gracefully in that
    /// case.
    fn node(&self, node: NodeRef) -> Option<CastNode>;

    /// Invokes the entity's update callback. May mutate arbitrary engine
    /// state, including deleting cast-list nodes.
    fn invoke_update(&mut self, entity: EntityRef);

    /// Invokes the entity's dispose callback.
    fn invoke_dispose(&mut self, entity: EntityRef);

    /// Returns whether an engine abort (e.g. a save/load) is underway.
    fn abort_in_progress(&self) -> bool;

    /// Returns whether the fast-cast gate object is currently set.
    fn fast_cast_active(&self) -> bool;
}
