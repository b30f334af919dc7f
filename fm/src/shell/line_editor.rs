// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug,
          io::{self, Write}};

use crossterm::{QueueableCommand, cursor,
                event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
                terminal::{Clear, ClearType::FromCursorDown}};
use r3bl_suggest::{Acceptance, KEY_BACKSPACE, LineBuffer, PromptHost, StringLength};
use unicode_segmentation::UnicodeSegmentation;

/// What a key did to the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditorEvent {
    /// The char (or [`KEY_BACKSPACE`]) was applied to the line.
    Edited(char),
    /// The cursor moved, the text did not change.
    CursorMoved,
    /// Right arrow with the cursor at the end of the line.
    AcceptRequested,
    /// Enter. The line is handed over and the editor stops drawing until
    /// [`LineEditor::start_line`].
    Line(String),
    /// Ctrl+C. The line was thrown away.
    Interrupted,
    /// Ctrl+D on an empty line.
    Eof,
    Ignored,
}

/// A single line editor, just enough to host suggestions: insert, backspace,
/// left/right/home/end, enter, Ctrl+C, Ctrl+D.
#[derive(Debug)]
pub struct LineEditor<W: Write + Debug> {
    /// Unicode line.
    pub line: String,
    /// Index of grapheme in line.
    pub line_cursor_grapheme: usize,
    /// Column of the cursor, counted from the start of the prompt. Can exceed the
    /// terminal width when the line wraps.
    pub current_column: u16,
    /// May contain SGR escape sequences (eg: the warning prompt).
    pub prompt: String,
    /// Columns, rows.
    pub term_size: (u16, u16),
    /// Between [`LineEditor::start_line`] and enter.
    pub is_reading: bool,
    out: W,
}

impl<W: Write + Debug> LineEditor<W> {
    pub fn new(prompt: impl Into<String>, term_size: (u16, u16), out: W) -> Self {
        let prompt = prompt.into();
        let current_column = display_width(&prompt);
        Self {
            line: String::new(),
            line_cursor_grapheme: 0,
            current_column,
            prompt,
            term_size,
            is_reading: false,
            out,
        }
    }

    /// Draw the prompt and an empty line.
    ///
    /// # Errors
    ///
    /// If the terminal can't be written to.
    pub fn start_line(&mut self) -> io::Result<()> {
        self.line.clear();
        self.move_cursor(isize::MIN);
        self.is_reading = true;
        self.render()?;
        self.out.flush()
    }

    /// Gets the number of lines wrapped.
    fn line_height(&self, pos: u16) -> u16 { pos / self.term_size.0.max(1) }

    /// Move from a position on the line to the start.
    fn move_to_beginning(&mut self, from: u16) -> io::Result<()> {
        let move_up = self.line_height(from.saturating_sub(1));
        self.out.queue(cursor::MoveToColumn(0))?;
        if move_up != 0 {
            self.out.queue(cursor::MoveUp(move_up))?;
        }
        Ok(())
    }

    /// Move from the start of the line to some position.
    fn move_from_beginning(&mut self, to: u16) -> io::Result<()> {
        let line_height = self.line_height(to.saturating_sub(1));
        let line_remaining_len = to % self.term_size.0.max(1);
        if line_height != 0 {
            self.out.queue(cursor::MoveDown(line_height))?;
        }
        if line_remaining_len != 0 {
            self.out.queue(cursor::MoveRight(line_remaining_len))?;
        }
        Ok(())
    }

    /// Move cursor by `change` graphemes, left when negative. Clamped to the line.
    fn move_cursor(&mut self, change: isize) {
        let count = self.line.graphemes(true).count();
        self.line_cursor_grapheme = self
            .line_cursor_grapheme
            .saturating_add_signed(change)
            .min(count);
        let column = display_width(&self.prompt)
            .saturating_add(display_width(&self.line[..self.cursor_byte_offset()]));
        self.current_column = column;
    }

    fn cursor_byte_offset(&self) -> usize {
        self.line
            .grapheme_indices(true)
            .nth(self.line_cursor_grapheme)
            .map_or(self.line.len(), |(offset, _)| offset)
    }

    /// The grapheme just before the cursor.
    fn current_grapheme(&self) -> Option<(usize, &str)> {
        self.line
            .grapheme_indices(true)
            .take(self.line_cursor_grapheme)
            .last()
    }

    #[must_use]
    pub fn cursor_at_end(&self) -> bool { self.cursor_byte_offset() == self.line.len() }

    /// Clear current line.
    fn clear(&mut self) -> io::Result<()> {
        self.move_to_beginning(self.current_column)?;
        self.out.queue(Clear(FromCursorDown))?;
        Ok(())
    }

    /// Render line.
    fn render(&mut self) -> io::Result<()> {
        write!(self.out, "{}{}", self.prompt, self.line)?;
        let line_len = display_width(&self.prompt).saturating_add(display_width(&self.line));
        self.move_to_beginning(line_len)?;
        self.move_from_beginning(self.current_column)?;
        Ok(())
    }

    fn clear_and_render(&mut self) -> io::Result<()> {
        self.clear()?;
        self.render()?;
        self.out.flush()
    }

    fn update_prompt(&mut self, prompt: &str) -> io::Result<()> {
        if !self.is_reading {
            self.prompt = prompt.to_string();
            self.move_cursor(0);
            return Ok(());
        }
        self.clear()?;
        self.prompt = prompt.to_string();
        // Recalculates column.
        self.move_cursor(0);
        self.render()?;
        self.out.flush()
    }

    /// Put the accepted suggestion in the line and move to its end.
    ///
    /// # Errors
    ///
    /// If the terminal can't be written to.
    pub fn apply_acceptance(&mut self, acceptance: &Acceptance) -> io::Result<()> {
        self.clear()?;
        self.line = acceptance.apply_to(&self.line);
        self.move_cursor(isize::MAX);
        self.render()?;
        self.out.flush()
    }

    /// Write text produced by a command, then nothing else: the caller starts the next
    /// line when it is done.
    ///
    /// # Errors
    ///
    /// If the terminal can't be written to.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        // Raw mode: newlines don't return the carriage.
        for line in text.split_inclusive('\n') {
            match line.strip_suffix('\n') {
                Some(line) => write!(self.out, "{line}\r\n")?,
                None => write!(self.out, "{line}")?,
            }
        }
        self.out.flush()
    }

    /// Apply one terminal event.
    ///
    /// # Errors
    ///
    /// If the terminal can't be written to.
    pub fn handle_event(&mut self, event: &Event) -> io::Result<LineEditorEvent> {
        match event {
            // Control Keys
            Event::Key(KeyEvent {
                code,
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                // End of transmission (CTRL-D)
                KeyCode::Char('d') if self.line.is_empty() => {
                    write!(self.out, "\r\n")?;
                    self.is_reading = false;
                    self.out.flush()?;
                    Ok(LineEditorEvent::Eof)
                }
                // End of text (CTRL-C)
                KeyCode::Char('c') => {
                    self.move_to_end()?;
                    write!(self.out, "^C\r\n")?;
                    self.line.clear();
                    self.move_cursor(isize::MIN);
                    self.is_reading = false;
                    self.out.flush()?;
                    Ok(LineEditorEvent::Interrupted)
                }
                _ => Ok(LineEditorEvent::Ignored),
            },
            // Other Modifiers (None, Shift, Control+Alt)
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(*code),
            Event::Resize(cols, rows) => {
                self.term_size = (*cols, *rows);
                if self.is_reading {
                    self.clear_and_render()?;
                }
                Ok(LineEditorEvent::CursorMoved)
            }
            _ => Ok(LineEditorEvent::Ignored),
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> io::Result<LineEditorEvent> {
        match code {
            KeyCode::Enter => {
                self.move_to_end()?;
                write!(self.out, "\r\n")?;
                self.is_reading = false;
                self.out.flush()?;

                // Take line.
                let line = std::mem::take(&mut self.line);
                self.move_cursor(isize::MIN);
                Ok(LineEditorEvent::Line(line))
            }
            // Delete character from line.
            KeyCode::Backspace => {
                let Some((pos, str)) = self.current_grapheme() else {
                    return Ok(LineEditorEvent::Ignored);
                };
                let range = pos..pos + str.len();
                self.clear()?;
                self.line.replace_range(range, "");
                self.move_cursor(-1);
                self.render()?;
                self.out.flush()?;
                Ok(LineEditorEvent::Edited(KEY_BACKSPACE))
            }
            KeyCode::Left => self.move_and_redraw(-1),
            KeyCode::Right if self.cursor_at_end() => Ok(LineEditorEvent::AcceptRequested),
            KeyCode::Right => self.move_and_redraw(1),
            KeyCode::Home => self.move_and_redraw(isize::MIN),
            KeyCode::End => self.move_and_redraw(isize::MAX),
            // Add character to line and output.
            KeyCode::Char(ch) => {
                self.clear()?;
                let pos = self.cursor_byte_offset();
                self.line.insert(pos, ch);
                // A combining char joins the grapheme before it.
                let graphemes_before = self.line[..pos + ch.len_utf8()].graphemes(true).count();
                self.line_cursor_grapheme = graphemes_before;
                self.move_cursor(0);
                self.render()?;
                self.out.flush()?;
                Ok(LineEditorEvent::Edited(ch))
            }
            _ => Ok(LineEditorEvent::Ignored),
        }
    }

    /// Put the cursor after the last char so output starts below the line.
    fn move_to_end(&mut self) -> io::Result<()> {
        self.move_to_beginning(self.current_column)?;
        self.move_cursor(isize::MAX);
        self.move_from_beginning(self.current_column)
    }

    /// Copy of the line for the suggestion engine, which needs the editor itself as
    /// its prompt host.
    #[must_use]
    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            text: self.line.clone(),
            cursor: self.cursor_byte_offset(),
        }
    }

    fn move_and_redraw(&mut self, change: isize) -> io::Result<LineEditorEvent> {
        self.move_to_beginning(self.current_column)?;
        self.move_cursor(change);
        self.move_from_beginning(self.current_column)?;
        self.out.flush()?;
        Ok(LineEditorEvent::CursorMoved)
    }
}

fn display_width(text: &str) -> u16 {
    u16::try_from(StringLength::StripAnsi.calculate(text)).unwrap_or(u16::MAX)
}

/// The line and the cursor at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSnapshot {
    pub text: String,
    /// Byte offset.
    pub cursor: usize,
}

impl LineBuffer for LineSnapshot {
    fn text(&self) -> &str { &self.text }

    fn cursor(&self) -> usize { self.cursor }
}

impl<W: Write + Debug> LineBuffer for LineEditor<W> {
    fn text(&self) -> &str { &self.line }

    fn cursor(&self) -> usize { self.cursor_byte_offset() }
}

impl<W: Write + Debug> PromptHost for LineEditor<W> {
    fn prompt(&self) -> String { self.prompt.clone() }

    fn set_prompt(&mut self, prompt: &str) {
        if let Err(error) = self.update_prompt(prompt) {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Could not redraw prompt", error = ?error);
        }
    }
}
