// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Path completion for what is being typed. The first completion in sort order is
//! suggested.

use std::{fs,
          path::{Path, PathBuf}};

use crate::{MatchMode, MatchRequest, MatchResult, Suggestion, SuggestionSource,
            SuggestionTables, SuggestionType, candidate_for_word, match_prefix,
            suggestion_color_for_path, unescape_word};

const FILE_URI_PREFIX: &str = "file://";

#[derive(Debug, Default, Clone, Copy)]
pub struct CompletionSource;

impl SuggestionSource for CompletionSource {
    fn code(&self) -> char { 'c' }

    fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult {
        let config = request.config;
        if request.is_first_word() && !config.autocd && !config.auto_open {
            return MatchResult::NoMatch;
        }

        let raw = request.word.text.as_str();
        let (uri_len, raw) = match raw.strip_prefix(FILE_URI_PREFIX) {
            Some(rest) => (FILE_URI_PREFIX.len(), rest),
            None => (0, raw),
        };
        if raw.is_empty() {
            return MatchResult::NoMatch;
        }

        // Bare command names are looked up by the command check.
        if request.is_first_word() && !raw.contains('/') {
            return MatchResult::NoMatch;
        }
        complete_path(request, raw, request.word.start + uri_len, mode)
    }
}

fn complete_path(
    request: &MatchRequest<'_>,
    raw: &str,
    replace_from: usize,
    mode: MatchMode,
) -> MatchResult {
    let tables = request.tables;
    let typed = unescape_word(raw);

    if mode == MatchMode::Check {
        return if resolve_path(&typed, tables).exists() {
            MatchResult::Full(SuggestionType::Completion)
        } else {
            MatchResult::NoMatch
        };
    }

    // A `/` is never escaped, so the directory part can be split off the raw word and
    // the literal text alike.
    let (typed_dir, typed_base) = match typed.rfind('/') {
        Some(index) => typed.split_at(index + 1),
        None => ("", typed.as_str()),
    };
    let raw_dir_len = raw.rfind('/').map_or(0, |index| index + 1);
    let (raw_dir, raw_base) = raw.split_at(raw_dir_len);

    let search_dir = if typed_dir.is_empty() {
        tables.cwd.clone()
    } else {
        resolve_path(typed_dir, tables)
    };
    let Ok(read_dir) = fs::read_dir(&search_dir) else {
        return MatchResult::NoMatch;
    };

    let show_hidden = typed_base.starts_with('.');
    let mut names: Vec<String> = read_dir
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| show_hidden || !name.starts_with('.'))
        .filter(|name| match_prefix(name, typed_base, request.case_sensitive()).is_some())
        .collect();
    names.sort();
    let Some(name) = names.into_iter().next() else {
        return MatchResult::NoMatch;
    };

    let path = search_dir.join(&name);
    let name = if path.is_dir() { format!("{name}/") } else { name };
    let Some(candidate) = candidate_for_word(raw_base, &name, request.case_sensitive())
    else {
        return MatchResult::NoMatch;
    };

    Suggestion::suffix(
        format!("{raw_dir}{}", candidate.text),
        raw_dir.len() + candidate.typed_len,
        replace_from,
        suggestion_color_for_path(&path, request.config),
        SuggestionType::Completion,
    )
    .into_match_result()
}

/// Replace a leading `~` with the home directory.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use r3bl_suggest::expand_tilde;
///
/// let home = Some(Path::new("/home/nadia"));
/// assert_eq!(expand_tilde("~/src", home), PathBuf::from("/home/nadia/src"));
/// assert_eq!(expand_tilde("~", home), PathBuf::from("/home/nadia"));
/// assert_eq!(expand_tilde("src", home), PathBuf::from("src"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (_, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        _ => PathBuf::from(path),
    }
}

/// `path` as typed, made absolute against the current directory.
#[must_use]
pub fn resolve_path(path: &str, tables: &SuggestionTables) -> PathBuf {
    let expanded = expand_tilde(path, tables.home_dir().as_deref());
    if expanded.is_absolute() {
        expanded
    } else {
        tables.cwd.join(expanded)
    }
}
