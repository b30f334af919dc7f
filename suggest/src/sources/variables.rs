// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{MatchMode, MatchRequest, MatchResult, Suggestion, SuggestionType,
            match_prefix, strings_eq};

/// Environment and session variable names, for words starting with `$`. Names are
/// always compared ignoring case.
#[derive(Debug, Default, Clone, Copy)]
pub struct VariableSource;

impl VariableSource {
    #[must_use]
    pub fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult {
        let Some(typed) = request.word.text.strip_prefix('$') else {
            return MatchResult::NoMatch;
        };
        if typed.is_empty() {
            return MatchResult::NoMatch;
        }
        let tables = request.tables;
        let mut names = tables
            .environment
            .iter()
            .chain(&tables.user_vars)
            .map(|(name, _)| name);

        match mode {
            MatchMode::Check => {
                if names.any(|name| strings_eq(name, typed, false)) {
                    MatchResult::Full(SuggestionType::EnvVar)
                } else {
                    MatchResult::NoMatch
                }
            }
            MatchMode::Print => names
                .find_map(|name| Some((name, match_prefix(name, typed, false)?)))
                .map_or(MatchResult::NoMatch, |(name, typed_len)| {
                    Suggestion::suffix(
                        format!("${name}"),
                        1 + typed_len,
                        request.word.start,
                        request.config.colors.variable.clone(),
                        SuggestionType::EnvVar,
                    )
                    .into_match_result()
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SuggestionConfig, SuggestionTables, assert_eq2, segment};

    fn run(line: &str) -> MatchResult {
        let tables = SuggestionTables {
            environment: vec![("HOME".into(), "/home/user".into())],
            user_vars: vec![("PROJECT".into(), "fm".into())],
            ..Default::default()
        };
        let config = SuggestionConfig::default();
        let segmentation = segment(line, line.len());
        let word = segmentation.current_word().unwrap();
        let request = MatchRequest {
            line,
            word,
            words_before: segmentation.words_before(word),
            tables: &tables,
            config: &config,
        };
        VariableSource.try_match(&request, MatchMode::for_word(word))
    }

    #[test]
    fn test_prefix_ignores_case() {
        let MatchResult::Partial(it) = run("echo $ho") else {
            panic!("expected a partial match");
        };
        assert_eq2!(it.text, "$HOME");
        assert_eq2!(it.render_text(), "ME");
    }

    #[test]
    fn test_session_vars() {
        let MatchResult::Partial(it) = run("echo $PRO") else {
            panic!("expected a partial match");
        };
        assert_eq2!(it.render_text(), "JECT");
    }

    #[test]
    fn test_full_and_no_match() {
        assert_eq2!(run("echo $HOME"), MatchResult::Full(SuggestionType::EnvVar));
        assert_eq2!(run("echo $home "), MatchResult::Full(SuggestionType::EnvVar));
        assert_eq2!(run("echo $NOPE"), MatchResult::NoMatch);
        assert_eq2!(run("echo HOME"), MatchResult::NoMatch);
    }
}
