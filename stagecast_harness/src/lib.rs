// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory collaborators for exercising the animation core.
//!
//! Real embedders wire [`stagecast_core`] to a scripting VM, a resource
//! cache, and a platform framebuffer. This crate provides deterministic
//! substitutes for all three so cycles can run headless:
//!
//! **[`SimEntityStore`]** — entity property slots with a write log (so tests
//! can tell a silent clamp from a written-back one), a generation-checked
//! node arena for cast lists, and scriptable update callbacks that can
//! mutate signals, delete their own node, or raise the abort and fast-cast
//! gates mid-walk.
//!
//! **[`SimScreen`]** — a three-channel pixel buffer with a presented copy
//! and a full call log, so tests can assert both final pixels and the exact
//! order of draw/save/restore/flush operations.
//!
//! **[`SimViews`]** — a table of sprite cel dimensions with the standard
//! bottom-anchored rect rules, including the scaled and legacy variants.

pub mod entity;
pub mod screen;
pub mod views;

pub use entity::{SimEntityStore, UpdateScript};
pub use screen::{ScreenCall, SimScreen};
pub use views::SimViews;
