// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite metadata table with the standard bottom-anchored rect rules.

use stagecast_core::{CelSource, Rect, ViewId};

#[derive(Clone, Copy, Debug)]
struct CelDims {
    width: i16,
    height: i16,
}

#[derive(Clone, Debug)]
struct SimView {
    loops: Vec<Vec<CelDims>>,
    scalable: bool,
}

/// In-memory [`CelSource`].
///
/// Cels are rectangles of given dimensions; a cel's on-screen rect is
/// anchored with its bottom row at `y - z` and centered horizontally on
/// `x`. Scaled rects shrink both dimensions by the fixed-point factors; the
/// legacy rect is the plain rect extended by the caller-provided base.
#[derive(Clone, Debug, Default)]
pub struct SimViews {
    views: Vec<Option<SimView>>,
}

impl SimViews {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scalable view; `loops` gives `(width, height)` per cel.
    pub fn add_view(&mut self, id: i16, loops: &[&[(i16, i16)]]) {
        self.insert(id, loops, true);
    }

    /// Registers a view authored unscalable (always renders at 100%).
    pub fn add_unscalable_view(&mut self, id: i16, loops: &[&[(i16, i16)]]) {
        self.insert(id, loops, false);
    }

    fn insert(&mut self, id: i16, loops: &[&[(i16, i16)]], scalable: bool) {
        let idx = id as usize;
        if self.views.len() <= idx {
            self.views.resize(idx + 1, None);
        }
        self.views[idx] = Some(SimView {
            loops: loops
                .iter()
                .map(|cels| {
                    cels.iter()
                        .map(|&(width, height)| CelDims { width, height })
                        .collect()
                })
                .collect(),
            scalable,
        });
    }

    fn view(&self, id: ViewId) -> &SimView {
        self.views
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .unwrap_or_else(|| panic!("unknown view {id:?}"))
    }

    fn dims(&self, id: ViewId, loop_no: i16, cel_no: i16) -> CelDims {
        let view = self.view(id);
        view.loops[loop_no as usize][cel_no as usize]
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "sim tables are tiny; counts and scaled dimensions fit i16"
)]
impl CelSource for SimViews {
    fn loop_count(&self, view: ViewId) -> i16 {
        self.view(view).loops.len() as i16
    }

    fn cel_count(&self, view: ViewId, loop_no: i16) -> i16 {
        self.view(view).loops[loop_no as usize].len() as i16
    }

    fn cel_height(&self, view: ViewId, loop_no: i16, cel_no: i16) -> i16 {
        self.dims(view, loop_no, cel_no).height
    }

    fn is_scalable(&self, view: ViewId) -> bool {
        self.view(view).scalable
    }

    fn cel_rect(&self, view: ViewId, loop_no: i16, cel_no: i16, x: i16, y: i16, z: i16) -> Rect {
        let d = self.dims(view, loop_no, cel_no);
        let bottom = y - z + 1;
        let left = x - d.width / 2;
        Rect::new(left, bottom - d.height, left + d.width, bottom)
    }

    fn cel_rect_scaled(
        &self,
        view: ViewId,
        loop_no: i16,
        cel_no: i16,
        x: i16,
        y: i16,
        z: i16,
        scale_x: i16,
        scale_y: i16,
    ) -> Rect {
        let d = self.dims(view, loop_no, cel_no);
        let width = (i32::from(d.width) * i32::from(scale_x) / 128) as i16;
        let height = (i32::from(d.height) * i32::from(scale_y) / 128) as i16;
        let bottom = y - z + 1;
        let left = x - width / 2;
        Rect::new(left, bottom - height, left + width, bottom)
    }

    fn cel_rect_legacy(
        &self,
        view: ViewId,
        loop_no: i16,
        cel_no: i16,
        x: i16,
        y: i16,
        z: i16,
        base: Rect,
    ) -> Rect {
        let plain = self.cel_rect(view, loop_no, cel_no, x, y, z);
        plain.extend(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_bottom_anchored_and_centered() {
        let mut views = SimViews::new();
        views.add_view(1, &[&[(10, 20)]]);
        let r = views.cel_rect(ViewId(1), 0, 0, 100, 50, 0);
        assert_eq!(r, Rect::new(95, 31, 105, 51));
        assert_eq!(r.height(), 20);
    }

    #[test]
    fn z_lifts_the_rect_off_the_ground() {
        let mut views = SimViews::new();
        views.add_view(1, &[&[(10, 20)]]);
        let grounded = views.cel_rect(ViewId(1), 0, 0, 100, 50, 0);
        let lifted = views.cel_rect(ViewId(1), 0, 0, 100, 50, 5);
        assert_eq!(lifted, grounded.translated(0, -5));
    }

    #[test]
    fn half_scale_halves_both_dimensions() {
        let mut views = SimViews::new();
        views.add_view(1, &[&[(16, 32)]]);
        let r = views.cel_rect_scaled(ViewId(1), 0, 0, 100, 50, 0, 64, 64);
        assert_eq!(r.width(), 8);
        assert_eq!(r.height(), 16);
        assert_eq!(r.bottom, 51);
    }

    #[test]
    fn legacy_rect_extends_over_the_base() {
        let mut views = SimViews::new();
        views.add_view(1, &[&[(10, 10)]]);
        let base = Rect::new(0, 0, 4, 4);
        let r = views.cel_rect_legacy(ViewId(1), 0, 0, 100, 50, 0, base);
        assert!(r.contains(0, 0));
        assert!(r.contains(100, 50));
    }
}
