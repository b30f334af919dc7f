// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug,
          io::{self, Write}};

use crossterm::{QueueableCommand, cursor,
                style::{Attribute, Print, SetAttribute},
                terminal::{self, Clear,
                           ClearType::{FromCursorDown, UntilNewLine}}};

use super::{CursorPos, TermSize, TerminalOps};
use crate::{SgrColor, ok};

/// [`TerminalOps`] on top of crossterm. Everything is queued on `out` and only reaches
/// the terminal on [`TerminalOps::flush`].
#[derive(Debug)]
pub struct CrosstermTerminal<W> {
    out: W,
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(out: W) -> Self { Self { out } }

    pub fn into_inner(self) -> W { self.out }
}

impl<W: Write + Debug> TerminalOps for CrosstermTerminal<W> {
    fn size(&mut self) -> io::Result<TermSize> {
        let (cols, rows) = terminal::size()?;
        Ok(TermSize { cols, rows })
    }

    fn cursor_position(&mut self) -> io::Result<CursorPos> {
        // Anything still queued would move the cursor after the answer.
        self.out.flush()?;
        let (col, row) = cursor::position()?;
        Ok(CursorPos { col, row })
    }

    fn clear_to_end_of_line(&mut self) -> io::Result<()> {
        self.out.queue(Clear(UntilNewLine))?;
        ok!()
    }

    fn clear_to_end_of_screen(&mut self) -> io::Result<()> {
        self.out.queue(Clear(FromCursorDown))?;
        ok!()
    }

    fn move_to_next_line(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveToNextLine(1))?;
        ok!()
    }

    fn move_to(&mut self, pos: CursorPos) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(pos.col, pos.row))?;
        ok!()
    }

    fn move_right(&mut self, cols: u16) -> io::Result<()> {
        if cols > 0 {
            self.out.queue(cursor::MoveRight(cols))?;
        }
        ok!()
    }

    fn write_styled(&mut self, text: &str, color: &SgrColor) -> io::Result<()> {
        if !color.is_empty() {
            self.out.queue(Print(color.escape_sequence()))?;
        }
        self.out.queue(Print(text))?;
        ok!()
    }

    fn reset_style(&mut self, restore: Option<&SgrColor>) -> io::Result<()> {
        self.out.queue(SetAttribute(Attribute::Reset))?;
        if let Some(color) = restore.filter(|it| !it.is_empty()) {
            self.out.queue(Print(color.escape_sequence()))?;
        }
        ok!()
    }

    fn flush(&mut self) -> io::Result<()> { self.out.flush() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    fn output(term: CrosstermTerminal<Vec<u8>>) -> String {
        String::from_utf8(term.into_inner()).unwrap()
    }

    #[test]
    fn test_write_styled_and_reset() {
        let mut term = CrosstermTerminal::new(Vec::new());
        term.write_styled("pha.txt", &SgrColor::new("02;04;36")).unwrap();
        term.reset_style(Some(&SgrColor::new("00;31"))).unwrap();
        assert_eq2!(output(term), "\x1b[02;04;36mpha.txt\x1b[0m\x1b[00;31m");
    }

    #[test]
    fn test_plain_write_has_no_color() {
        let mut term = CrosstermTerminal::new(Vec::new());
        term.write_styled("  ", &SgrColor::default()).unwrap();
        assert_eq2!(output(term), "  ");
    }

    #[test]
    fn test_cursor_and_clear_sequences() {
        let mut term = CrosstermTerminal::new(Vec::new());
        term.move_to(CursorPos::new(15, 5)).unwrap();
        term.clear_to_end_of_line().unwrap();
        term.clear_to_end_of_screen().unwrap();
        term.move_right(0).unwrap();
        assert_eq2!(output(term), "\x1b[6;16H\x1b[K\x1b[J");
    }
}
