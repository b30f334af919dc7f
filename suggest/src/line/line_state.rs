// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Segmentation, segment};

/// Read access to the line editor's buffer. The suggestion engine never mutates the
/// buffer, it only needs the text and where the cursor is.
pub trait LineBuffer {
    fn text(&self) -> &str;

    /// Byte offset of the cursor in [`LineBuffer::text`].
    fn cursor(&self) -> usize;
}

/// Snapshot of the line for a single keystroke. It is rebuilt from the [`LineBuffer`]
/// every time and dropped when the keystroke has been handled, so it can never go
/// stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineState {
    pub text: String,
    pub cursor: usize,
    pub segmentation: Segmentation,
}

impl LineState {
    /// The cursor is clamped to the buffer and moved back to a char boundary if the
    /// line editor reports an offset in the middle of a multi-byte char.
    pub fn capture(buffer: &dyn LineBuffer) -> Self {
        let text = buffer.text().to_string();
        let mut cursor = buffer.cursor().min(text.len());
        while !text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        let segmentation = segment(&text, cursor);
        Self {
            text,
            cursor,
            segmentation,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.text.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    #[must_use]
    pub fn cursor_at_end(&self) -> bool { self.segmentation.cursor_at_end() }

    /// The line has at least two words in its last segment and the cursor is on the
    /// first one, ie: the user went back to fix the command name.
    #[must_use]
    pub fn cursor_in_first_word(&self) -> bool {
        if self.segmentation.word_count < 2 {
            return false;
        }
        self.segmentation
            .first_word()
            .is_some_and(|word| self.cursor >= word.start && self.cursor <= word.end)
    }
}
