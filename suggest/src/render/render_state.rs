// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::CursorPos;
use crate::SgrColor;

/// What is currently drawn after the cursor. At most one suggestion is ever on screen,
/// and [`RenderState::printed`] is true exactly while it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub printed: bool,
    /// The text that was drawn.
    pub buffer: String,
    /// Screen rows the suggestion spans, counting the row the cursor is on.
    pub rows_used: u16,
    /// Where the cursor was put back after drawing, adjusted for scrolling.
    pub origin: CursorPos,
    pub color: SgrColor,
}
