// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{MatchMode, MatchRequest, MatchResult, Suggestion, SuggestionSource,
            SuggestionType, match_prefix};

/// Previously entered lines. The whole line is matched, not just the current word, and
/// the newest entry wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct HistorySource;

impl SuggestionSource for HistorySource {
    fn code(&self) -> char { 'h' }

    fn try_match(&self, request: &MatchRequest<'_>, _mode: MatchMode) -> MatchResult {
        let line = request.line;
        if line.is_empty() {
            return MatchResult::NoMatch;
        }

        request
            .tables
            .history
            .iter()
            .rev()
            .find_map(|entry| {
                let typed_len = match_prefix(entry, line, request.case_sensitive())?;
                (typed_len < entry.len()).then(|| {
                    Suggestion::suffix(
                        entry.clone(),
                        typed_len,
                        0,
                        request.config.colors.history.clone(),
                        SuggestionType::History,
                    )
                })
            })
            .map_or(MatchResult::NoMatch, MatchResult::Partial)
    }
}
