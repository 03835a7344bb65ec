// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame cast animation and screen compositing for retro adventure
//! interpreters.
//!
//! `stagecast_core` renders a scene of independently moving "cast members"
//! (actors, props, effects) onto a double-buffered multi-channel screen with
//! priority-based occlusion, partial redraw, and the exact compatibility
//! quirks the original interpreters exposed to game scripts.
//!
//! # Architecture
//!
//! The crate is organized around one synchronous animation cycle per frame:
//!
//! ```text
//!   external cast list (EntityStore)
//!       │
//!       ▼
//!   Animator::animate()
//!       ├─ update callbacks (frozen-skip, abort/fast-cast gates)
//!       ├─ snapshot + back-to-front sort ──► Vec<CastEntry>
//!       ├─ geometry resolution (CelSource) + dirty classification
//!       ├─ signal-machine passes (BackdropStore save/restore)
//!       ├─ final draw pass ──► last-cast snapshot
//!       ├─ minimal dirty-region flush (Screen::show)
//!       └─ signal writeback + disposal
//! ```
//!
//! **[`Animator`]** — the engine. Owns the working cast, the persisted
//! last-cast snapshot, and the parked backgrounds; everything else belongs
//! to the embedder and is passed in per call.
//!
//! **[`CastEntry`]** — one entity's per-cycle snapshot; a cache whose signal
//! mutations are written back before the cycle ends.
//!
//! **[`Signal`]** — the historical per-entity flag encoding, round-tripped
//! verbatim through the external entity store.
//!
//! **[`BackdropStore`]** — generation-checked slots for saved screen
//! regions, so a stale handle is caught instead of corrupting pixels.
//!
//! **[`AnimateConfig`]** — capability descriptor replacing the original
//! per-generation engine variants with data-driven branches.
//!
//! The embedder supplies three collaborators: [`EntityStore`] (the
//! scripting/object system), [`CelSource`] (the sprite resource cache), and
//! [`Screen`] (pixel-level drawing and presentation).

pub mod backdrop;
pub mod cast;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod rect;
pub mod screen;
pub mod signal;
pub mod view;

pub use backdrop::{BackdropHandle, BackdropStore};
pub use cast::CastEntry;
pub use config::{AnimateConfig, Generation};
pub use engine::Animator;
pub use entity::{CastListRef, CastNode, EntityRef, EntityStore, NodeRef, Prop};
pub use error::{AnimateError, Result};
pub use rect::Rect;
pub use screen::Screen;
pub use signal::{ChannelMask, ScaleSignal, Signal};
pub use view::{CelSource, ViewId};
