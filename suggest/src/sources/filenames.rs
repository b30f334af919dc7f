// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ListingEntry, MatchMode, MatchRequest, MatchResult, Suggestion,
            SuggestionSource, SuggestionType, candidate_for_word, is_shell_special,
            strings_eq, suggestion_color_for_path, unescape_word};

/// Names in the current directory listing. Directories are suggested with a trailing
/// `/`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilenameSource;

impl SuggestionSource for FilenameSource {
    fn code(&self) -> char { 'f' }

    fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult {
        let word = request.word;
        let (prefix, body) = split_prefix(&word.text, word.is_first_word);

        // Listing names never contain a slash, so a word with one in the middle is a
        // path (handled by path completion).
        let trimmed = body.strip_suffix('/').unwrap_or(body);
        if trimmed.is_empty() || trimmed.contains('/') {
            return MatchResult::NoMatch;
        }

        let mut listing = request
            .tables
            .listing
            .iter()
            .filter(|entry| request.allows_first_word(entry.is_dir));

        match mode {
            MatchMode::Check => {
                let typed = unescape_word(trimmed);
                listing
                    .find(|entry| strings_eq(&entry.name, &typed, request.case_sensitive()))
                    .map_or(MatchResult::NoMatch, |entry| MatchResult::Full(entry_type(entry)))
            }
            MatchMode::Print => {
                for entry in listing {
                    let name = entry_name(entry);
                    let Some(candidate) =
                        candidate_for_word(body, &name, request.case_sensitive())
                    else {
                        continue;
                    };
                    let color = suggestion_color_for_path(
                        &request.tables.cwd.join(&entry.name),
                        request.config,
                    );
                    return Suggestion::suffix(
                        format!("{prefix}{}", candidate.text),
                        prefix.len() + candidate.typed_len,
                        word.start,
                        color,
                        entry_type(entry),
                    )
                    .into_match_result();
                }
                MatchResult::NoMatch
            }
        }
    }
}

/// Splits off a leading `./`, or for the command name a leading backslash (which runs
/// a command bypassing aliases). Both are put back in front of the suggestion.
fn split_prefix(text: &str, is_first_word: bool) -> (&str, &str) {
    if let Some(rest) = text.strip_prefix("./") {
        return ("./", rest);
    }
    if is_first_word
        && let Some(rest) = text.strip_prefix('\\')
        && rest.chars().next().is_some_and(|ch| !is_shell_special(ch))
    {
        return ("\\", rest);
    }
    ("", text)
}

pub(crate) fn entry_name(entry: &ListingEntry) -> String {
    if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}

pub(crate) fn entry_type(entry: &ListingEntry) -> SuggestionType {
    if entry.is_dir {
        SuggestionType::Dir
    } else {
        SuggestionType::File
    }
}
