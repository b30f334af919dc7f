// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{MatchMode, MatchRequest, MatchResult, Suggestion, SuggestionSource,
            SuggestionType, match_prefix, strings_eq, unescape_word};

/// Alias names. A prefix of a name shows what the alias expands to.
#[derive(Debug, Default, Clone, Copy)]
pub struct AliasSource;

impl SuggestionSource for AliasSource {
    fn code(&self) -> char { 'a' }

    fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult {
        let typed = unescape_word(&request.word.text);
        if typed.is_empty() {
            return MatchResult::NoMatch;
        }
        let aliases = &request.tables.aliases;

        match mode {
            MatchMode::Check => {
                if aliases
                    .iter()
                    .any(|alias| strings_eq(&alias.name, &typed, request.case_sensitive()))
                {
                    MatchResult::Full(SuggestionType::Alias)
                } else {
                    MatchResult::NoMatch
                }
            }
            MatchMode::Print => aliases
                .iter()
                .find(|alias| {
                    match_prefix(&alias.name, &typed, request.case_sensitive()).is_some()
                })
                .map_or(MatchResult::NoMatch, |alias| {
                    Suggestion::replacement(
                        alias.expansion.clone(),
                        request.word.start,
                        request.config.colors.alias.clone(),
                        SuggestionType::Alias,
                    )
                    .into_match_result()
                }),
        }
    }
}
