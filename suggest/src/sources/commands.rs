// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{MatchMode, MatchRequest, MatchResult, SgrColor, Suggestion,
            SuggestionTables, SuggestionType, match_prefix, unescape_word};

/// Command names, looked up for the first word of a segment after every strategy came
/// up empty. Internal commands are tried first, then `$PATH`, then shell builtins.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandSource;

impl CommandSource {
    #[must_use]
    pub fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult {
        let raw = request.word.text.as_str();
        // `\name` runs `name` bypassing aliases.
        let (prefix, raw_name) = match raw.strip_prefix('\\') {
            Some(rest) if !rest.is_empty() => ("\\", rest),
            _ => ("", raw),
        };
        let typed = unescape_word(raw_name);
        if typed.is_empty() {
            return MatchResult::NoMatch;
        }

        let tables = request.tables;
        let colors = &request.config.colors;
        let groups: [(&[String], SuggestionType, &SgrColor); 3] = [
            (
                tables.internal_commands.as_slice(),
                SuggestionType::Command,
                &colors.internal_command,
            ),
            (
                tables.path_commands.as_slice(),
                SuggestionType::Command,
                &colors.external_command,
            ),
            (
                tables.shell_builtins.as_slice(),
                SuggestionType::Builtin,
                &colors.builtin,
            ),
        ];

        if let Some((_, suggestion_type, _)) = groups
            .iter()
            .find(|(names, _, _)| names.iter().any(|name| name == &typed))
        {
            return MatchResult::Full(*suggestion_type);
        }
        if is_fused_internal_command(&typed, tables) {
            return MatchResult::Full(SuggestionType::Command);
        }

        // An alias is a valid command even when the strategy string leaves out `a`.
        if tables.aliases.iter().any(|alias| alias.name == typed) {
            return MatchResult::Full(SuggestionType::Alias);
        }
        if mode == MatchMode::Check {
            return MatchResult::NoMatch;
        }

        for (names, suggestion_type, color) in groups {
            for name in names {
                if let Some(typed_len) = match_prefix(name, &typed, request.case_sensitive()) {
                    return Suggestion::suffix(
                        format!("{prefix}{name}"),
                        prefix.len() + typed_len,
                        request.word.start,
                        color.clone(),
                        suggestion_type,
                    )
                    .into_match_result();
                }
            }
        }
        MatchResult::NoMatch
    }
}

/// Internal commands take a number glued to their name, eg: `o12` opens entry 12.
fn is_fused_internal_command(typed: &str, tables: &SuggestionTables) -> bool {
    let name = typed.trim_end_matches(|ch: char| ch.is_ascii_digit());
    !name.is_empty() && name.len() < typed.len() && tables.is_internal_command(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Alias, SuggestionConfig, assert_eq2, segment};

    fn tables() -> SuggestionTables {
        SuggestionTables {
            internal_commands: vec!["cd".into(), "o".into(), "bd".into()],
            path_commands: vec!["git".into(), "ls".into(), "lsblk".into()],
            shell_builtins: vec!["export".into()],
            aliases: vec![Alias {
                name: "ll".into(),
                expansion: "ls -la".into(),
            }],
            ..Default::default()
        }
    }

    fn run(line: &str) -> MatchResult {
        let tables = tables();
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
        CommandSource.try_match(&request, MatchMode::for_word(word))
    }

    #[test]
    fn test_external_command_prefix() {
        let MatchResult::Partial(it) = run("gi") else {
            panic!("expected a partial match");
        };
        assert_eq2!(it.render_text(), "t");
        assert_eq2!(it.color, SuggestionConfig::default().colors.external_command);
        assert_eq2!(it.suggestion_type, SuggestionType::Command);
    }

    #[test]
    fn test_exact_name_wins_over_longer_names() {
        assert_eq2!(run("ls"), MatchResult::Full(SuggestionType::Command));
    }

    #[test]
    fn test_builtin() {
        let MatchResult::Partial(it) = run("exp") else {
            panic!("expected a partial match");
        };
        assert_eq2!(it.suggestion_type, SuggestionType::Builtin);
        assert_eq2!(it.render_text(), "ort");
    }

    #[test]
    fn test_backslash_prefix_is_kept() {
        let MatchResult::Partial(it) = run(r"\gi") else {
            panic!("expected a partial match");
        };
        assert_eq2!(it.text, r"\git");
        assert_eq2!(it.render_text(), "t");
    }

    #[test]
    fn test_alias_name_while_typing_is_full() {
        assert_eq2!(run("ll"), MatchResult::Full(SuggestionType::Alias));
    }

    #[test]
    fn test_check_mode() {
        assert_eq2!(run("git "), MatchResult::Full(SuggestionType::Command));
        assert_eq2!(run("ll "), MatchResult::Full(SuggestionType::Alias));
        assert_eq2!(run("o12 "), MatchResult::Full(SuggestionType::Command));
        assert_eq2!(run("gi "), MatchResult::NoMatch);
        assert_eq2!(run("xyz "), MatchResult::NoMatch);
    }
}
