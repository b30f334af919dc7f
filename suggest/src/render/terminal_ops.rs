// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, io};

use crate::SgrColor;

/// 0 based cursor position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPos {
    pub col: u16,
    pub row: u16,
}

impl CursorPos {
    #[must_use]
    pub fn new(col: u16, row: u16) -> Self { Self { col, row } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub cols: u16,
    pub rows: u16,
}

/// The terminal primitives the renderer needs. Writes may be buffered until
/// [`TerminalOps::flush`].
pub trait TerminalOps: Debug {
    fn size(&mut self) -> io::Result<TermSize>;

    /// Ask the terminal where the cursor is.
    fn cursor_position(&mut self) -> io::Result<CursorPos>;

    fn clear_to_end_of_line(&mut self) -> io::Result<()>;

    fn clear_to_end_of_screen(&mut self) -> io::Result<()>;

    /// Move to column 0 of the next row. Never scrolls.
    fn move_to_next_line(&mut self) -> io::Result<()>;

    fn move_to(&mut self, pos: CursorPos) -> io::Result<()>;

    fn move_right(&mut self, cols: u16) -> io::Result<()>;

    /// Write `text` in `color`. The color stays active until
    /// [`TerminalOps::reset_style`].
    fn write_styled(&mut self, text: &str, color: &SgrColor) -> io::Result<()>;

    /// Reset all attributes, then switch to `restore` if given.
    fn reset_style(&mut self, restore: Option<&SgrColor>) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}
