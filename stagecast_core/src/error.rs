// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for animation cycles.

use thiserror::Error;

use crate::view::ViewId;

/// Errors surfaced by the animation core.
///
/// Only hard failures are represented here. Out-of-range loop/cel indices
/// are silently normalized (game content depends on that), and an engine
/// abort during callback invocation is a cooperative early return, not an
/// error. Misusing a backdrop handle (double restore/free) is a caller
/// contract violation and panics instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimateError {
    /// Global perspective scaling hit degenerate geometry: a zero cel height
    /// or a viewport bottom equal to the vanishing line. No scale fields
    /// have been written when this is returned.
    #[error(
        "degenerate global-scale geometry for view {view:?} loop {loop_no} cel {cel_no} \
         (cel height {cel_height}, perspective span {span})"
    )]
    DegenerateGeometry {
        /// Sprite resource being scaled.
        view: ViewId,
        /// Loop index within the view.
        loop_no: i16,
        /// Cel index within the loop.
        cel_no: i16,
        /// Unscaled cel height.
        cel_height: i16,
        /// `viewport bottom - vanishing Y` denominator.
        span: i16,
    },
    /// The caller passed a reference that does not resolve to a cast list.
    #[error("cast list reference {0} does not resolve to a list")]
    InvalidList(u32),
}

/// Convenience alias for animation results.
pub type Result<T> = core::result::Result<T, AnimateError>;
