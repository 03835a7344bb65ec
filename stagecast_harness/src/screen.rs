// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three-channel simulated screen with a call log.

use stagecast_core::{ChannelMask, Rect, Screen, ViewId};

/// One recorded screen operation.
///
/// Pixel payloads are omitted; tests assert on operation kind, order, and
/// geometry, and on the final buffer contents separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenCall {
    /// A captured region was blitted back.
    Blit {
        /// Restored region.
        rect: Rect,
        /// Channels restored.
        mask: ChannelMask,
    },
    /// A sprite cel was drawn.
    DrawCel {
        /// Sprite resource.
        view: ViewId,
        /// Loop index.
        loop_no: i16,
        /// Cel index.
        cel_no: i16,
        /// Target rect.
        rect: Rect,
        /// Priority band drawn at.
        priority: i16,
    },
    /// The control channel was filled.
    FillControl {
        /// Filled region.
        rect: Rect,
        /// Fill value.
        value: u8,
    },
    /// A region was flushed to the presented buffer.
    Show {
        /// Flushed region.
        rect: Rect,
    },
    /// An update bracket was opened.
    BeginUpdate,
    /// An update bracket was closed.
    EndUpdate,
    /// The cursor was hidden.
    HideCursor,
    /// The cursor was shown.
    ShowCursor,
    /// The scene transition ran.
    Transition {
        /// Transitioned region.
        rect: Rect,
    },
}

/// Captured pixels for one saved region.
#[derive(Clone, Debug)]
pub struct SavedRegion {
    visual: Vec<u8>,
    priority: Vec<u8>,
    control: Vec<u8>,
}

/// A work buffer (visual/priority/control), a presented copy of the visual
/// channel, and a log of every operation the engine performed.
///
/// Drawing a cel paints its rect with the view id (truncated to a byte) on
/// the visual channel and the priority value on the priority channel, which
/// is enough for tests to recognize who painted where. The y↔priority
/// mapping is linear in bands of [`BAND_HEIGHT`](Self::BAND_HEIGHT) rows.
#[derive(Debug)]
pub struct SimScreen {
    width: i16,
    height: i16,
    visual: Vec<u8>,
    priority: Vec<u8>,
    control: Vec<u8>,
    presented: Vec<u8>,
    pic_not_valid: u8,
    cursor_visible: bool,
    calls: Vec<ScreenCall>,
}

impl SimScreen {
    /// Rows per priority band.
    pub const BAND_HEIGHT: i16 = 10;

    /// Creates a screen of the classic 320x200 size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(320, 200)
    }

    /// Creates a screen of the given size, all channels zeroed.
    #[must_use]
    pub fn with_size(width: i16, height: i16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            visual: vec![0; len],
            priority: vec![0; len],
            control: vec![0; len],
            presented: vec![0; len],
            pic_not_valid: 0,
            cursor_visible: true,
            calls: Vec::new(),
        }
    }

    /// The recorded operations, in order.
    #[must_use]
    pub fn calls(&self) -> &[ScreenCall] {
        &self.calls
    }

    /// Drops the recorded operations (between setup and the cycle under
    /// test).
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// The recorded draw operations only, in order.
    #[must_use]
    pub fn draw_calls(&self) -> Vec<ScreenCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, ScreenCall::DrawCel { .. }))
            .copied()
            .collect()
    }

    /// Work-buffer visual pixel at `(x, y)`.
    #[must_use]
    pub fn visual_at(&self, x: i16, y: i16) -> u8 {
        self.visual[self.offset(x, y)]
    }

    /// Work-buffer control pixel at `(x, y)`.
    #[must_use]
    pub fn control_at(&self, x: i16, y: i16) -> u8 {
        self.control[self.offset(x, y)]
    }

    /// Presented (flushed) visual pixel at `(x, y)`.
    #[must_use]
    pub fn presented_at(&self, x: i16, y: i16) -> u8 {
        self.presented[self.offset(x, y)]
    }

    /// Fills the visual work buffer with `value` (scene backdrop setup).
    pub fn fill_visual(&mut self, value: u8) {
        self.visual.fill(value);
    }

    fn offset(&self, x: i16, y: i16) -> usize {
        debug_assert!(
            x >= 0 && x < self.width && y >= 0 && y < self.height,
            "pixel ({x}, {y}) out of bounds"
        );
        y as usize * self.width as usize + x as usize
    }

    fn clipped(&self, rect: Rect) -> Rect {
        rect.clip(Rect::new(0, 0, self.width, self.height))
    }
}

impl Default for SimScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for SimScreen {
    type Saved = SavedRegion;

    fn capture(&self, rect: Rect, mask: ChannelMask) -> SavedRegion {
        // Captures are not logged: `capture` takes `&self`. Save order is
        // observable through the draw calls that follow each save.
        let rect = self.clipped(rect);
        let mut saved = SavedRegion {
            visual: Vec::new(),
            priority: Vec::new(),
            control: Vec::new(),
        };
        for y in rect.top..rect.bottom {
            for x in rect.left..rect.right {
                let o = self.offset(x, y);
                if mask.contains(ChannelMask::VISUAL) {
                    saved.visual.push(self.visual[o]);
                }
                if mask.contains(ChannelMask::PRIORITY) {
                    saved.priority.push(self.priority[o]);
                }
                if mask.contains(ChannelMask::CONTROL) {
                    saved.control.push(self.control[o]);
                }
            }
        }
        saved
    }

    fn blit(&mut self, rect: Rect, mask: ChannelMask, saved: &SavedRegion) {
        let rect = self.clipped(rect);
        self.calls.push(ScreenCall::Blit { rect, mask });
        let mut i = 0;
        for y in rect.top..rect.bottom {
            for x in rect.left..rect.right {
                let o = self.offset(x, y);
                if mask.contains(ChannelMask::VISUAL) {
                    self.visual[o] = saved.visual[i];
                }
                if mask.contains(ChannelMask::PRIORITY) {
                    self.priority[o] = saved.priority[i];
                }
                if mask.contains(ChannelMask::CONTROL) {
                    self.control[o] = saved.control[i];
                }
                i += 1;
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "view ids and priorities become marker bytes in the sim buffers"
    )]
    fn draw_cel(
        &mut self,
        view: ViewId,
        loop_no: i16,
        cel_no: i16,
        rect: Rect,
        priority: i16,
        _palette: i16,
        _scale_x: i16,
        _scale_y: i16,
    ) {
        self.calls.push(ScreenCall::DrawCel {
            view,
            loop_no,
            cel_no,
            rect,
            priority,
        });
        let clipped = self.clipped(rect);
        for y in clipped.top..clipped.bottom {
            for x in clipped.left..clipped.right {
                let o = self.offset(x, y);
                // Lower priority pixels do not overdraw higher ones.
                if self.priority[o] <= priority as u8 {
                    self.visual[o] = view.0 as u8;
                    self.priority[o] = priority as u8;
                }
            }
        }
    }

    fn fill_control(&mut self, rect: Rect, value: u8) {
        self.calls.push(ScreenCall::FillControl { rect, value });
        let clipped = self.clipped(rect);
        for y in clipped.top..clipped.bottom {
            for x in clipped.left..clipped.right {
                let o = self.offset(x, y);
                self.control[o] = value;
            }
        }
    }

    fn show(&mut self, rect: Rect) {
        self.calls.push(ScreenCall::Show { rect });
        let clipped = self.clipped(rect);
        for y in clipped.top..clipped.bottom {
            for x in clipped.left..clipped.right {
                let o = self.offset(x, y);
                self.presented[o] = self.visual[o];
            }
        }
    }

    fn priority_for_y(&self, y: i16) -> i16 {
        (y / Self::BAND_HEIGHT).clamp(0, 15)
    }

    fn y_for_priority(&self, priority: i16) -> i16 {
        priority.clamp(0, 15) * Self::BAND_HEIGHT
    }

    fn pic_not_valid(&self) -> u8 {
        self.pic_not_valid
    }

    fn set_pic_not_valid(&mut self, value: u8) {
        self.pic_not_valid = value;
    }

    fn view_port(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn begin_update(&mut self) {
        self.calls.push(ScreenCall::BeginUpdate);
    }

    fn end_update(&mut self) {
        self.calls.push(ScreenCall::EndUpdate);
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn show_cursor(&mut self) {
        self.cursor_visible = true;
        self.calls.push(ScreenCall::ShowCursor);
    }

    fn hide_cursor(&mut self) {
        self.cursor_visible = false;
        self.calls.push(ScreenCall::HideCursor);
    }

    fn transition(&mut self, rect: Rect) {
        self.calls.push(ScreenCall::Transition { rect });
        let clipped = self.clipped(rect);
        for y in clipped.top..clipped.bottom {
            for x in clipped.left..clipped.right {
                let o = self.offset(x, y);
                self.presented[o] = self.visual[o];
            }
        }
        self.pic_not_valid = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_bands_are_linear() {
        let screen = SimScreen::new();
        assert_eq!(screen.priority_for_y(0), 0);
        assert_eq!(screen.priority_for_y(95), 9);
        assert_eq!(screen.priority_for_y(199), 15);
        assert_eq!(screen.y_for_priority(9), 90);
    }

    #[test]
    fn draw_respects_priority_channel() {
        let mut screen = SimScreen::new();
        screen.draw_cel(ViewId(7), 0, 0, Rect::new(0, 0, 4, 4), 10, 0, 128, 128);
        screen.draw_cel(ViewId(9), 0, 0, Rect::new(0, 0, 4, 4), 5, 0, 128, 128);
        // The later, lower-priority draw loses.
        assert_eq!(screen.visual_at(1, 1), 7);
    }

    #[test]
    fn show_copies_only_the_flushed_region() {
        let mut screen = SimScreen::new();
        screen.fill_visual(3);
        screen.show(Rect::new(0, 0, 10, 10));
        assert_eq!(screen.presented_at(5, 5), 3);
        assert_eq!(screen.presented_at(15, 15), 0);
    }

    #[test]
    fn transition_presents_and_validates_the_picture() {
        let mut screen = SimScreen::new();
        screen.set_pic_not_valid(2);
        screen.fill_visual(4);
        screen.transition(Rect::new(0, 0, 320, 200));
        assert_eq!(screen.pic_not_valid(), 0);
        assert_eq!(screen.presented_at(100, 100), 4);
    }
}
