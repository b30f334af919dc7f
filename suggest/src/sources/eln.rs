// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::filenames::{entry_name, entry_type};
use crate::{MatchMode, MatchRequest, MatchResult, Suggestion, SuggestionSource,
            SuggestionType, escape_str, suggestion_color_for_path};

/// Entry list numbers: typing `2` stands for the second entry of the listing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ElnSource;

impl SuggestionSource for ElnSource {
    fn code(&self) -> char { 'e' }

    fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult {
        let word = request.word;
        let Some(number) = parse_eln(word.text.strip_suffix('&').unwrap_or(&word.text))
        else {
            return MatchResult::NoMatch;
        };
        // The listing may have changed since the number was on screen.
        let Some(entry) = number
            .checked_sub(1)
            .and_then(|index| request.tables.listing.get(index))
        else {
            return MatchResult::NoMatch;
        };

        if mode == MatchMode::Check {
            return MatchResult::Full(SuggestionType::Eln);
        }

        let text = escape_str(&entry_name(entry));
        let color =
            suggestion_color_for_path(&request.tables.cwd.join(&entry.name), request.config);
        let digit_count = word.text.chars().count();

        // A name no longer than the number can't be drawn over it, show it whole.
        if digit_count >= text.chars().count() {
            return MatchResult::Partial(Suggestion::replacement(
                text,
                word.start,
                color,
                entry_type(entry),
            ));
        }

        // The digits are replaced by the name, so the name is drawn as if the number had
        // been its first chars.
        let typed_len = text
            .char_indices()
            .nth(digit_count)
            .map_or(text.len(), |(offset, _)| offset);
        MatchResult::Partial(Suggestion::suffix(
            text,
            typed_len,
            word.start,
            color,
            entry_type(entry),
        ))
    }
}

/// A positive number without leading zeros.
fn parse_eln(text: &str) -> Option<usize> {
    let first = text.chars().next()?;
    if !('1'..='9').contains(&first) || !text.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
