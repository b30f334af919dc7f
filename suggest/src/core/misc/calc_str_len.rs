// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// How many terminal columns a string occupies. Wide characters (CJK, most emoji)
/// count as two columns, combining marks as zero.
///
/// ```
/// use r3bl_suggest::StringLength;
/* cspell:disable-next-line */
/// let input = "\u{1b}[31mfoo\u{1b}[0m";
/// assert_eq!(StringLength::StripAnsi.calculate(input), 3);
/// assert_eq!(StringLength::Unicode.calculate("日本"), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringLength {
    /// Remove SGR and other escape sequences first. Use this for prompts.
    StripAnsi,
    /// The input is plain text.
    Unicode,
}

impl StringLength {
    #[must_use]
    pub fn calculate(&self, input: &str) -> usize {
        match self {
            StringLength::Unicode => UnicodeWidthStr::width(input),
            StringLength::StripAnsi => {
                let stripped_input = strip_ansi::strip_ansi(input);
                let stripped_input: &str = stripped_input.as_ref();
                UnicodeWidthStr::width(stripped_input)
            }
        }
    }

    /// Same as [`StringLength::calculate`] for raw bytes that came from a file name or
    /// the environment. Valid UTF-8 prefixes are measured normally, and every byte that
    /// is not part of a valid sequence counts as one column.
    #[must_use]
    pub fn calculate_bytes(&self, input: &[u8]) -> usize {
        let mut width = 0;
        for chunk in input.utf8_chunks() {
            width += self.calculate(chunk.valid());
            width += chunk.invalid().len();
        }
        width
    }
}

/// Width of a single char, with control characters counted as zero.
#[must_use]
pub fn char_display_width(ch: char) -> usize { UnicodeWidthChar::width(ch).unwrap_or(0) }
