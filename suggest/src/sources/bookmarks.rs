// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fs;

use crate::{MatchMode, MatchRequest, MatchResult, Suggestion, SuggestionSource,
            SuggestionType, escape_str, expand_tilde, file_type_color, match_prefix,
            strings_eq, unescape_word};

/// Bookmark names. The bookmarked path is shown in place of the name. Bookmarks whose
/// path no longer exists are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct BookmarkSource;

impl SuggestionSource for BookmarkSource {
    fn code(&self) -> char { 'b' }

    fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult {
        let typed = unescape_word(&request.word.text);
        if typed.is_empty() {
            return MatchResult::NoMatch;
        }
        let home = request.tables.home_dir();
        let case_sensitive = request.case_sensitive();

        for bookmark in &request.tables.bookmarks {
            let is_name_match = match mode {
                MatchMode::Check => strings_eq(&bookmark.name, &typed, case_sensitive),
                MatchMode::Print => {
                    match_prefix(&bookmark.name, &typed, case_sensitive).is_some()
                }
            };
            if !is_name_match {
                continue;
            }

            let path = expand_tilde(&bookmark.path, home.as_deref());
            let Ok(metadata) = fs::metadata(&path) else {
                continue;
            };
            if !request.allows_first_word(metadata.is_dir()) {
                continue;
            }

            if mode == MatchMode::Check {
                return MatchResult::Full(SuggestionType::Bookmark);
            }

            let mut text = escape_str(&path.to_string_lossy());
            if metadata.is_dir() && !text.ends_with('/') {
                text.push('/');
            }
            let color = file_type_color(&path, &request.config.file_type_colors)
                .filter(|it| !it.is_empty())
                .unwrap_or_else(|| request.config.colors.file.clone());

            return Suggestion::replacement(
                text,
                request.word.start,
                color,
                SuggestionType::Bookmark,
            )
            .into_match_result();
        }

        MatchResult::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bookmark, SuggestionConfig, SuggestionTables, assert_eq2, segment};

    fn run(tables: &SuggestionTables, line: &str) -> MatchResult {
        let config = SuggestionConfig::default();
        let segmentation = segment(line, line.len());
        let word = segmentation.current_word().unwrap();
        let request = MatchRequest {
            line,
            word,
            words_before: segmentation.words_before(word),
            tables,
            config: &config,
        };
        BookmarkSource.try_match(&request, MatchMode::for_word(word))
    }

    #[test]
    fn test_bookmark_path_replaces_name() {
        let dir = tempfile::tempdir().unwrap();
        let tables = SuggestionTables {
            bookmarks: vec![
                Bookmark {
                    name: "gone".into(),
                    path: dir.path().join("missing").to_string_lossy().to_string(),
                },
                Bookmark {
                    name: "good".into(),
                    path: dir.path().to_string_lossy().to_string(),
                },
            ],
            ..Default::default()
        };

        let MatchResult::Partial(it) = run(&tables, "cd go") else {
            panic!("expected a partial match");
        };
        assert_eq2!(
            it.text,
            format!("{}/", escape_str(&dir.path().to_string_lossy()))
        );
        assert_eq2!(it.suggestion_type, SuggestionType::Bookmark);

        assert_eq2!(
            run(&tables, "cd good "),
            MatchResult::Full(SuggestionType::Bookmark)
        );
        assert_eq2!(run(&tables, "cd gone "), MatchResult::NoMatch);
    }

    #[test]
    fn test_tilde_paths() {
        let dir = tempfile::tempdir().unwrap();
        let tables = SuggestionTables {
            environment: vec![("HOME".into(), dir.path().to_string_lossy().to_string())],
            bookmarks: vec![Bookmark {
                name: "home".into(),
                path: "~".into(),
            }],
            ..Default::default()
        };
        assert!(run(&tables, "cd ho").is_match());
    }
}
