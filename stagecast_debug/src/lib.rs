// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable cast-list dumps for Stagecast diagnostics.
//!
//! - [`listing::CastListing`] — one line per cast entry, for a debugger
//!   console or log file.

pub mod listing;
