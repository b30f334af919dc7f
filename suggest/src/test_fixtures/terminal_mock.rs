// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use crate::{CursorPos, SgrColor, TermSize, TerminalOps, char_display_width};

/// Marks the second cell of a double width char.
const WIDE_CONTINUATION: char = '\0';

/// Every call made on [`TerminalMock`], in order. Queries are included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOp {
    Size,
    CursorQuery,
    ClearToEndOfLine,
    ClearToEndOfScreen,
    MoveToNextLine,
    MoveTo(CursorPos),
    MoveRight(u16),
    Write { text: String, color: SgrColor },
    ResetStyle(Option<SgrColor>),
    Flush,
}

/// A screen grid that behaves like a VT100 for the operations in [`TerminalOps`]:
/// writing past the last column wraps (with the usual pending wrap at the right
/// margin), writing past the last row scrolls, and cursor movement is clamped.
#[derive(Debug, Clone)]
pub struct TerminalMock {
    size: TermSize,
    grid: Vec<Vec<char>>,
    cursor: CursorPos,
    /// The last column was just written. The next char goes to the next row.
    pending_wrap: bool,
    ops: Vec<TermOp>,
    /// Make [`TerminalOps::size`] and [`TerminalOps::cursor_position`] fail.
    pub fail_queries: bool,
}

impl TerminalMock {
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            size: TermSize { cols, rows },
            grid: vec![vec![' '; usize::from(cols)]; usize::from(rows)],
            cursor: CursorPos::default(),
            pending_wrap: false,
            ops: Vec::new(),
            fail_queries: false,
        }
    }

    #[must_use]
    pub fn with_cursor(mut self, col: u16, row: u16) -> Self {
        self.cursor = self.clamp(CursorPos { col, row });
        self
    }

    /// What a line editor does when it echoes typed text. Not recorded in
    /// [`TerminalMock::ops`].
    pub fn echo(&mut self, text: &str) {
        for ch in text.chars() {
            self.put_char(ch);
        }
    }

    /// Move left one cell and blank it, like a line editor handling backspace.
    pub fn backspace(&mut self) {
        if self.pending_wrap {
            self.pending_wrap = false;
        } else if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.size.cols.saturating_sub(1);
        }
        self.set_cell(self.cursor, ' ');
    }

    /// Row contents with trailing blanks removed.
    #[must_use]
    pub fn row_text(&self, row: u16) -> String {
        self.grid
            .get(usize::from(row))
            .map(|cells| {
                cells
                    .iter()
                    .filter(|&&ch| ch != WIDE_CONTINUATION)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn screen(&self) -> Vec<String> {
        (0..self.size.rows).map(|row| self.row_text(row)).collect()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorPos { self.cursor }

    #[must_use]
    pub fn ops(&self) -> &[TermOp] { &self.ops }

    pub fn clear_ops(&mut self) { self.ops.clear(); }

    /// Text of every [`TermOp::Write`], concatenated.
    #[must_use]
    pub fn written_text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TermOp::Write { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn clamp(&self, pos: CursorPos) -> CursorPos {
        CursorPos {
            col: pos.col.min(self.size.cols.saturating_sub(1)),
            row: pos.row.min(self.size.rows.saturating_sub(1)),
        }
    }

    fn set_cell(&mut self, pos: CursorPos, ch: char) {
        if let Some(cell) = self
            .grid
            .get_mut(usize::from(pos.row))
            .and_then(|row| row.get_mut(usize::from(pos.col)))
        {
            *cell = ch;
        }
    }

    fn line_feed(&mut self) {
        if self.cursor.row + 1 < self.size.rows {
            self.cursor.row += 1;
        } else {
            self.grid.remove(0);
            self.grid.push(vec![' '; usize::from(self.size.cols)]);
        }
    }

    fn put_char(&mut self, ch: char) {
        match ch {
            '\n' => {
                self.pending_wrap = false;
                self.cursor.col = 0;
                self.line_feed();
                return;
            }
            '\r' => {
                self.pending_wrap = false;
                self.cursor.col = 0;
                return;
            }
            _ => {}
        }

        let width = char_display_width(ch);
        if width == 0 {
            return;
        }
        let width = u16::try_from(width).unwrap_or(1);

        if self.pending_wrap || self.cursor.col + width > self.size.cols {
            self.pending_wrap = false;
            self.cursor.col = 0;
            self.line_feed();
        }

        self.set_cell(self.cursor, ch);
        if width == 2 {
            self.set_cell(
                CursorPos {
                    col: self.cursor.col + 1,
                    row: self.cursor.row,
                },
                WIDE_CONTINUATION,
            );
        }

        if self.cursor.col + width >= self.size.cols {
            self.cursor.col = self.size.cols - 1;
            self.pending_wrap = true;
        } else {
            self.cursor.col += width;
        }
    }

    fn query_result(&self) -> io::Result<()> {
        if self.fail_queries {
            Err(io::Error::other("terminal did not answer"))
        } else {
            Ok(())
        }
    }
}

impl TerminalOps for TerminalMock {
    fn size(&mut self) -> io::Result<TermSize> {
        self.ops.push(TermOp::Size);
        self.query_result()?;
        Ok(self.size)
    }

    fn cursor_position(&mut self) -> io::Result<CursorPos> {
        self.ops.push(TermOp::CursorQuery);
        self.query_result()?;
        Ok(self.cursor)
    }

    fn clear_to_end_of_line(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ClearToEndOfLine);
        let CursorPos { col, row } = self.cursor;
        for col in col..self.size.cols {
            self.set_cell(CursorPos { col, row }, ' ');
        }
        Ok(())
    }

    fn clear_to_end_of_screen(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ClearToEndOfScreen);
        let CursorPos { col, row } = self.cursor;
        for col in col..self.size.cols {
            self.set_cell(CursorPos { col, row }, ' ');
        }
        for row in (row + 1)..self.size.rows {
            for col in 0..self.size.cols {
                self.set_cell(CursorPos { col, row }, ' ');
            }
        }
        Ok(())
    }

    fn move_to_next_line(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::MoveToNextLine);
        self.pending_wrap = false;
        self.cursor.col = 0;
        if self.cursor.row + 1 < self.size.rows {
            self.cursor.row += 1;
        }
        Ok(())
    }

    fn move_to(&mut self, pos: CursorPos) -> io::Result<()> {
        self.ops.push(TermOp::MoveTo(pos));
        self.pending_wrap = false;
        self.cursor = self.clamp(pos);
        Ok(())
    }

    fn move_right(&mut self, cols: u16) -> io::Result<()> {
        self.ops.push(TermOp::MoveRight(cols));
        self.pending_wrap = false;
        self.cursor.col = (self.cursor.col.saturating_add(cols))
            .min(self.size.cols.saturating_sub(1));
        Ok(())
    }

    fn write_styled(&mut self, text: &str, color: &SgrColor) -> io::Result<()> {
        self.ops.push(TermOp::Write {
            text: text.to_string(),
            color: color.clone(),
        });
        for ch in text.chars() {
            self.put_char(ch);
        }
        Ok(())
    }

    fn reset_style(&mut self, restore: Option<&SgrColor>) -> io::Result<()> {
        self.ops.push(TermOp::ResetStyle(restore.cloned()));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::Flush);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_pending_wrap_at_right_margin() {
        let mut term = TerminalMock::new(4, 2);
        term.echo("abcd");
        assert_eq2!(term.cursor(), CursorPos::new(3, 0));
        term.echo("e");
        assert_eq2!(term.screen(), vec!["abcd".to_string(), "e".to_string()]);
        assert_eq2!(term.cursor(), CursorPos::new(1, 1));
    }

    #[test]
    fn test_scrolls_at_bottom() {
        let mut term = TerminalMock::new(3, 2);
        term.echo("abcdefg");
        assert_eq2!(term.screen(), vec!["def".to_string(), "g".to_string()]);
    }

    #[test]
    fn test_wide_chars() {
        let mut term = TerminalMock::new(5, 2);
        term.echo("ab😀");
        assert_eq2!(term.cursor(), CursorPos::new(4, 0));
        term.echo("😀");
        assert_eq2!(term.row_text(1), "😀");
    }

    #[test]
    fn test_backspace() {
        let mut term = TerminalMock::new(10, 2);
        term.echo("ab");
        term.backspace();
        assert_eq2!(term.row_text(0), "a");
        assert_eq2!(term.cursor(), CursorPos::new(1, 0));
    }
}
