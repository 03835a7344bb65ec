// Copyright 2026 the Stagecast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen contract for platform/backend integrations.
//!
//! The core drives a double-buffered multi-channel screen (visual, priority,
//! control) through this trait. Pixel formats, clipping, and actual blitting
//! stay on the backend side; the core only decides *what* to draw, save,
//! restore, and flush, and in what order.
//!
//! # Cycle pseudocode
//!
//! A host wires an [`Animator`](crate::Animator) to its screen like this:
//!
//! ```rust,ignore
//! fn on_animate(list: CastListRef) -> Result<()> {
//!     // Snapshot + sort the cast, resolve geometry, run the signal
//!     // machine's passes, draw, and flush minimal dirty regions.
//!     animator.animate(&mut entities, &views, &mut screen, Some(list), true)
//! }
//! ```
//!
//! # Captured regions
//!
//! Background save/restore ownership lives in the core's
//! [`BackdropStore`](crate::BackdropStore); the screen only copies pixels.
//! [`capture`](Screen::capture) returns an opaque [`Saved`](Screen::Saved)
//! payload for a rect/channel selection and [`blit`](Screen::blit) writes one
//! back. The core never inspects the payload.

use crate::rect::Rect;
use crate::signal::ChannelMask;
use crate::view::ViewId;

/// A double-buffered, multi-channel screen plus the port/cursor/transition
/// services the animation cycle needs.
pub trait Screen {
    /// Opaque pixel payload produced by [`capture`](Self::capture).
    type Saved;

    /// Copies the selected channels of `rect` out of the work buffer.
    fn capture(&self, rect: Rect, mask: ChannelMask) -> Self::Saved;

    /// Copies a captured payload back into the work buffer.
    fn blit(&mut self, rect: Rect, mask: ChannelMask, saved: &Self::Saved);

    /// Draws a sprite cel into the work buffer.
    fn draw_cel(
        &mut self,
        view: ViewId,
        loop_no: i16,
        cel_no: i16,
        rect: Rect,
        priority: i16,
        palette: i16,
        scale_x: i16,
        scale_y: i16,
    );

    /// Fills `rect` on the control channel with `value`.
    fn fill_control(&mut self, rect: Rect, value: u8);

    /// Flushes `rect` from the work buffer to the visible framebuffer.
    fn show(&mut self, rect: Rect);

    /// Maps a y coordinate to its priority band.
    fn priority_for_y(&self, y: i16) -> i16;

    /// Maps a priority band back to its topmost y coordinate.
    fn y_for_priority(&self, priority: i16) -> i16;

    /// Current picture-invalid byte (0 = valid; 1 has a special meaning for
    /// the no-update restore pass).
    fn pic_not_valid(&self) -> u8;

    /// Sets the picture-invalid byte.
    fn set_pic_not_valid(&mut self, value: u8);

    /// The picture viewport in screen coordinates.
    fn view_port(&self) -> Rect;

    /// Begins a bracketed screen update (later interpreter generations).
    fn begin_update(&mut self);

    /// Ends a bracketed screen update.
    fn end_update(&mut self);

    /// Whether the mouse cursor is currently visible.
    fn cursor_visible(&self) -> bool;

    /// Shows the mouse cursor.
    fn show_cursor(&mut self);

    /// Hides the mouse cursor.
    fn hide_cursor(&mut self);

    /// Runs the pending fade/dissolve transition over `rect` and presents
    /// the result. Implementations clear the picture-invalid byte once the
    /// transition completes.
    fn transition(&mut self, rect: Rect);
}
