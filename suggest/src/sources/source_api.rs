// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use unicode_segmentation::UnicodeSegmentation;

use crate::{MatchMode, MatchResult, SuggestionConfig, SuggestionTables, Word, escape_str,
            unescape_word};

/// A place suggestions come from. Implementations hold no state between calls: asking
/// twice with the same request against the same tables gives the same answer.
pub trait SuggestionSource: Debug {
    /// The letter that names this source in the strategy string.
    fn code(&self) -> char;

    fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult;
}

/// Everything a source may look at for one keystroke.
#[derive(Debug, Clone, Copy)]
pub struct MatchRequest<'a> {
    pub line: &'a str,
    pub word: &'a Word,
    /// Words before [`MatchRequest::word`] in the same pipeline segment.
    pub words_before: &'a [Word],
    pub tables: &'a SuggestionTables,
    pub config: &'a SuggestionConfig,
}

impl MatchRequest<'_> {
    #[must_use]
    pub fn is_first_word(&self) -> bool { self.word.is_first_word }

    #[must_use]
    pub fn case_sensitive(&self) -> bool { self.config.case_sensitive }

    /// A bare name typed as the command is only worth suggesting if typing it would do
    /// something: change into a directory (autocd) or open a file (auto-open).
    #[must_use]
    pub fn allows_first_word(&self, is_dir: bool) -> bool {
        !self.is_first_word()
            || (is_dir && self.config.autocd)
            || (!is_dir && self.config.auto_open)
    }

    /// The command name of the segment, if the current word is an argument.
    #[must_use]
    pub fn command_name(&self) -> Option<&str> {
        self.words_before.first().map(|it| it.text.as_str())
    }
}

fn graphemes_eq(lhs: &str, rhs: &str, case_sensitive: bool) -> bool {
    lhs == rhs
        || (!case_sensitive
            && lhs
                .chars()
                .flat_map(char::to_lowercase)
                .eq(rhs.chars().flat_map(char::to_lowercase)))
}

/// If `typed` is a prefix of `candidate`, returns how many bytes of `candidate` it
/// covers. With case insensitive matching that can differ from `typed.len()`. Compares
/// grapheme clusters, so a base letter does not match half of an accented one.
///
/// ```
/// use r3bl_suggest::match_prefix;
/// assert_eq!(match_prefix("Alpha", "al", false), Some(2));
/// assert_eq!(match_prefix("Alpha", "al", true), None);
/// assert_eq!(match_prefix("al", "alpha", false), None);
/// ```
#[must_use]
pub fn match_prefix(candidate: &str, typed: &str, case_sensitive: bool) -> Option<usize> {
    let mut candidate_graphemes = candidate.grapheme_indices(true);
    for typed_grapheme in typed.graphemes(true) {
        let (_, candidate_grapheme) = candidate_graphemes.next()?;
        if !graphemes_eq(candidate_grapheme, typed_grapheme, case_sensitive) {
            return None;
        }
    }
    Some(
        candidate_graphemes
            .next()
            .map_or(candidate.len(), |(offset, _)| offset),
    )
}

#[must_use]
pub fn strings_eq(lhs: &str, rhs: &str, case_sensitive: bool) -> bool {
    lhs.graphemes(true).count() == rhs.graphemes(true).count()
        && lhs
            .graphemes(true)
            .zip(rhs.graphemes(true))
            .all(|(lhs, rhs)| graphemes_eq(lhs, rhs, case_sensitive))
}

/// A name matched against a word as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCandidate {
    /// The name as it should appear in the line: escaped, or behind the word's opening
    /// quote if the user started a quoted word.
    pub text: String,
    /// Bytes of [`WordCandidate::text`] the user has typed.
    pub typed_len: usize,
}

/// Match `name` (literal text, eg: a file name) against `raw_word` (what the user
/// typed, with escapes or quotes).
///
/// ```
/// use r3bl_suggest::candidate_for_word;
///
/// let it = candidate_for_word(r"my\ f", "my file", false).unwrap();
/// assert_eq!(it.text, r"my\ file");
/// assert_eq!(&it.text[it.typed_len..], "ile");
///
/// let it = candidate_for_word("'my f", "my file", false).unwrap();
/// assert_eq!(it.text, "'my file");
/// assert_eq!(&it.text[it.typed_len..], "ile");
/// ```
#[must_use]
pub fn candidate_for_word(
    raw_word: &str,
    name: &str,
    case_sensitive: bool,
) -> Option<WordCandidate> {
    let typed = unescape_word(raw_word);
    let matched_len = match_prefix(name, &typed, case_sensitive)?;

    match raw_word.chars().next() {
        Some(quote @ ('\'' | '"')) => Some(WordCandidate {
            text: format!("{quote}{name}"),
            typed_len: quote.len_utf8() + matched_len,
        }),
        _ => Some(WordCandidate {
            text: escape_str(name),
            typed_len: escape_str(&name[..matched_len]).len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case("alpha", "al", true, Some(2))]
    #[test_case("alpha", "", true, Some(0))]
    #[test_case("alpha", "alpha", true, Some(5))]
    #[test_case("alpha", "alphas", true, None)]
    #[test_case("ÉCOLE", "éc", false, Some(3); "case_insensitive_non_ascii")]
    #[test_case("ÉCOLE", "éc", true, None; "case_sensitive_non_ascii")]
    #[test_case("e\u{301}cole", "e", true, None; "half_of_combined_grapheme")]
    #[test_case("e\u{301}cole", "e\u{301}", true, Some(3); "whole_combined_grapheme")]
    fn test_match_prefix(
        candidate: &str,
        typed: &str,
        case_sensitive: bool,
        expected: Option<usize>,
    ) {
        assert_eq2!(match_prefix(candidate, typed, case_sensitive), expected);
    }

    #[test_case("Makefile", "makefile", false, true)]
    #[test_case("Makefile", "makefile", true, false)]
    #[test_case("Make", "Makefile", false, false)]
    fn test_strings_eq(lhs: &str, rhs: &str, case_sensitive: bool, expected: bool) {
        assert_eq2!(strings_eq(lhs, rhs, case_sensitive), expected);
    }

    #[test]
    fn test_candidate_for_unescaped_special_chars() {
        // The user typed `(` without escaping it, the candidate escapes it.
        let it = candidate_for_word("a(", "a(b)", true).unwrap();
        assert_eq2!(it.text, r"a\(b)");
        assert_eq2!(&it.text[it.typed_len..], "b)");
    }

    #[test]
    fn test_candidate_case_insensitive_keeps_name_case() {
        let it = candidate_for_word("read", "README.md", false).unwrap();
        assert_eq2!(it.text, "README.md");
        assert_eq2!(&it.text[it.typed_len..], "ME.md");
    }

    #[test]
    fn test_no_candidate_when_not_prefix() {
        assert!(candidate_for_word("beta", "alpha", false).is_none());
    }
}
