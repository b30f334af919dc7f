// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SgrColor, Word};

/// How strictly a source compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The word is closed (the user typed a separator after it). Only an exact match
    /// counts, nothing is drawn.
    Check,
    /// The word is still being typed. A prefix match produces something to draw.
    Print,
}

impl MatchMode {
    #[must_use]
    pub fn for_word(word: &Word) -> Self {
        if word.is_closed {
            MatchMode::Check
        } else {
            MatchMode::Print
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionType {
    File,
    Dir,
    Command,
    Builtin,
    Alias,
    Bookmark,
    History,
    Jump,
    Eln,
    EnvVar,
    Sel,
    Completion,
    BackDir,
}

/// How a suggestion relates to what is already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionDisplay {
    /// The typed text is a prefix of the suggestion, only the rest is drawn. Eg: typing
    /// `al` shows `pha.txt`.
    Suffix,
    /// The suggestion stands in for the typed word (alias expansion, bookmark path,
    /// jump target). It is drawn in full after a `>` marker.
    Replacement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The whole candidate, escaped, as it would appear in the line once accepted.
    pub text: String,
    /// For [`SuggestionDisplay::Suffix`], how many bytes at the start of
    /// [`Suggestion::text`] the user has already typed.
    pub typed_len: usize,
    /// Byte offset in the line where [`Suggestion::text`] goes when accepted. Everything
    /// from here to the end of the line is replaced.
    pub replace_from: usize,
    pub color: SgrColor,
    pub suggestion_type: SuggestionType,
    pub display: SuggestionDisplay,
}

impl Suggestion {
    #[must_use]
    pub fn suffix(
        text: String,
        typed_len: usize,
        replace_from: usize,
        color: SgrColor,
        suggestion_type: SuggestionType,
    ) -> Self {
        Self {
            text,
            typed_len,
            replace_from,
            color,
            suggestion_type,
            display: SuggestionDisplay::Suffix,
        }
    }

    #[must_use]
    pub fn replacement(
        text: String,
        replace_from: usize,
        color: SgrColor,
        suggestion_type: SuggestionType,
    ) -> Self {
        Self {
            text,
            typed_len: 0,
            replace_from,
            color,
            suggestion_type,
            display: SuggestionDisplay::Replacement,
        }
    }

    /// What actually gets drawn after the cursor.
    #[must_use]
    pub fn render_text(&self) -> &str {
        match self.display {
            SuggestionDisplay::Suffix => self.text.get(self.typed_len..).unwrap_or_default(),
            SuggestionDisplay::Replacement => &self.text,
        }
    }

    /// A suggestion with nothing left to draw means the user already typed all of it.
    #[must_use]
    pub fn into_match_result(self) -> MatchResult {
        if self.render_text().is_empty() {
            MatchResult::Full(self.suggestion_type)
        } else {
            MatchResult::Partial(self)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    /// There is something left to draw.
    Partial(Suggestion),
    /// The typed word is complete as is. Nothing must be drawn.
    Full(SuggestionType),
}

impl MatchResult {
    #[must_use]
    pub fn is_match(&self) -> bool { !matches!(self, MatchResult::NoMatch) }

    #[must_use]
    pub fn suggestion_type(&self) -> Option<SuggestionType> {
        match self {
            MatchResult::NoMatch => None,
            MatchResult::Partial(suggestion) => Some(suggestion.suggestion_type),
            MatchResult::Full(suggestion_type) => Some(*suggestion_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_suffix_render_text() {
        let it = Suggestion::suffix(
            "alpha.txt".into(),
            2,
            4,
            SgrColor::default(),
            SuggestionType::File,
        );
        assert_eq2!(it.render_text(), "pha.txt");
    }

    #[test]
    fn test_nothing_left_to_draw_is_full() {
        let it = Suggestion::suffix("ls".into(), 2, 0, SgrColor::default(), SuggestionType::Command);
        assert_eq2!(it.into_match_result(), MatchResult::Full(SuggestionType::Command));
    }

    #[test]
    fn test_replacement_draws_everything() {
        let it = Suggestion::replacement(
            "ls -la".into(),
            0,
            SgrColor::default(),
            SuggestionType::Alias,
        );
        assert_eq2!(it.render_text(), "ls -la");
        assert!(it.into_match_result().is_match());
    }
}
