// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Split the line being edited into words, the way a POSIX shell would for the purpose
//! of suggestions. Only the last pipeline segment (everything after the last unquoted
//! `;`, `|`, or `&&`) matters for "is this the first word" decisions, so each segment
//! is counted on its own.

use smallvec::{SmallVec, smallvec};

/// Stack allocated for the common case of short command lines.
pub type InlineVec<T> = SmallVec<[T; 8]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Raw text, escapes and quotes included.
    pub text: String,
    /// Byte offset of the first char in the line.
    pub start: usize,
    /// Byte offset one past the last char in the line.
    pub end: usize,
    /// First word of its pipeline segment, ie: the command name.
    pub is_first_word: bool,
    /// The word is followed by a separator (space, tab, `;`, `|`, `&`), so the user is
    /// done typing it.
    pub is_closed: bool,
    /// Index of the pipeline segment this word belongs to.
    pub segment: usize,
    /// Index of this word inside its segment.
    pub index_in_segment: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub words: InlineVec<Word>,
    /// Number of words in the last pipeline segment.
    pub word_count: usize,
    /// Byte offset where the first word of the last segment ends.
    pub first_word_end: Option<usize>,
    /// The quote char if the line ends inside an unterminated quote.
    pub open_quote: Option<char>,
    /// Byte offsets where each pipeline segment begins. Always starts with `0`.
    pub segment_starts: InlineVec<usize>,
    pub cursor: usize,
    pub len: usize,
}

impl Segmentation {
    #[must_use]
    pub fn cursor_at_end(&self) -> bool { self.cursor == self.len }

    #[must_use]
    pub fn last_segment(&self) -> usize { self.segment_starts.len() - 1 }

    /// Words of the last pipeline segment.
    #[must_use]
    pub fn current_segment_words(&self) -> &[Word] {
        let last_segment = self.last_segment();
        let first_index = self
            .words
            .iter()
            .position(|it| it.segment == last_segment)
            .unwrap_or(self.words.len());
        &self.words[first_index..]
    }

    /// The command name of the last pipeline segment.
    #[must_use]
    pub fn first_word(&self) -> Option<&Word> { self.current_segment_words().first() }

    /// The word suggestions are computed for. There is none unless the cursor sits at
    /// the end of the line, and none if the last segment has no words yet.
    #[must_use]
    pub fn current_word(&self) -> Option<&Word> {
        if !self.cursor_at_end() {
            return None;
        }
        self.current_segment_words().last()
    }

    /// The words before `word` in its own segment.
    #[must_use]
    pub fn words_before(&self, word: &Word) -> &[Word] {
        let segment_words = self.current_segment_words();
        let end = word.index_in_segment.min(segment_words.len());
        if segment_words.first().is_some_and(|it| it.segment == word.segment) {
            &segment_words[..end]
        } else {
            &[]
        }
    }
}

/// Split `line` into words. `cursor` is a byte offset into `line`.
///
/// ```
/// use r3bl_suggest::segment;
///
/// let it = segment(r"ls | cp my\ fi", 14);
/// assert_eq!(it.word_count, 2);
/// let word = it.current_word().unwrap();
/// assert_eq!(word.text, r"my\ fi");
/// assert_eq!(word.start, 8);
/// assert!(!word.is_closed);
/// ```
#[must_use]
pub fn segment(line: &str, cursor: usize) -> Segmentation {
    let mut segmenter = Segmenter::default();
    let mut open_quote: Option<char> = None;
    let mut escaped = false;
    let mut chars = line.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if escaped {
            escaped = false;
            continue;
        }

        if let Some(quote) = open_quote {
            if ch == quote {
                open_quote = None;
            } else if ch == '\\' && quote == '"' {
                escaped = true;
            }
            continue;
        }

        match ch {
            '\\' => {
                segmenter.start_word(offset);
                escaped = true;
            }
            '\'' | '"' => {
                segmenter.start_word(offset);
                open_quote = Some(ch);
            }
            ' ' | '\t' => segmenter.end_word(line, offset),
            ';' | '|' => {
                segmenter.end_word(line, offset);
                segmenter.start_segment(offset + 1);
            }
            '&' => {
                segmenter.end_word(line, offset);
                if chars.next_if(|&(_, next)| next == '&').is_some() {
                    segmenter.start_segment(offset + 2);
                }
            }
            _ => segmenter.start_word(offset),
        }
    }

    if let Some(start) = segmenter.word_start.take() {
        segmenter.push_word(line, start, line.len(), false);
    }

    let Segmenter {
        words,
        segment_starts,
        ..
    } = segmenter;

    let mut it = Segmentation {
        words,
        word_count: 0,
        first_word_end: None,
        open_quote,
        segment_starts,
        cursor: cursor.min(line.len()),
        len: line.len(),
    };
    let (word_count, first_word_end) = {
        let segment_words = it.current_segment_words();
        (segment_words.len(), segment_words.first().map(|word| word.end))
    };
    it.word_count = word_count;
    it.first_word_end = first_word_end;
    it
}

#[derive(Debug)]
struct Segmenter {
    words: InlineVec<Word>,
    segment_starts: InlineVec<usize>,
    word_start: Option<usize>,
    index_in_segment: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            words: InlineVec::new(),
            segment_starts: smallvec![0],
            word_start: None,
            index_in_segment: 0,
        }
    }
}

impl Segmenter {
    fn start_word(&mut self, offset: usize) { self.word_start.get_or_insert(offset); }

    fn end_word(&mut self, line: &str, separator_offset: usize) {
        if let Some(start) = self.word_start.take() {
            self.push_word(line, start, separator_offset, true);
        }
    }

    fn start_segment(&mut self, offset: usize) {
        self.segment_starts.push(offset);
        self.index_in_segment = 0;
    }

    fn push_word(&mut self, line: &str, start: usize, end: usize, is_closed: bool) {
        self.words.push(Word {
            text: line[start..end].to_string(),
            start,
            end,
            is_first_word: self.index_in_segment == 0,
            is_closed,
            segment: self.segment_starts.len() - 1,
            index_in_segment: self.index_in_segment,
        });
        self.index_in_segment += 1;
    }
}
