// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{MatchMode, MatchRequest, MatchResult, Suggestion, SuggestionSource,
            SuggestionType, candidate_for_word, strings_eq, suggestion_dir_color,
            unescape_word};

/// Directories from the jump database, best ranked first. The current directory is
/// never suggested.
#[derive(Debug, Default, Clone, Copy)]
pub struct JumpSource;

impl SuggestionSource for JumpSource {
    fn code(&self) -> char { 'j' }

    fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult {
        if request.is_first_word() && !request.config.autocd {
            return MatchResult::NoMatch;
        }
        let raw = request.word.text.as_str();
        let typed = unescape_word(raw);
        if typed.is_empty() {
            return MatchResult::NoMatch;
        }

        let cwd = request.tables.cwd_str();
        let mut entries = request
            .tables
            .jump_entries_by_rank()
            .into_iter()
            .filter(|entry| entry.path != cwd);

        match mode {
            MatchMode::Check => {
                let typed = if typed.len() > 1 {
                    typed.trim_end_matches('/')
                } else {
                    typed.as_str()
                };
                if entries.any(|entry| strings_eq(&entry.path, typed, request.case_sensitive()))
                {
                    MatchResult::Full(SuggestionType::Jump)
                } else {
                    MatchResult::NoMatch
                }
            }
            MatchMode::Print => {
                for entry in entries {
                    let path = with_trailing_slash(&entry.path);
                    let Some(candidate) =
                        candidate_for_word(raw, &path, request.case_sensitive())
                    else {
                        continue;
                    };
                    return Suggestion::suffix(
                        candidate.text,
                        candidate.typed_len,
                        request.word.start,
                        suggestion_dir_color(request.config),
                        SuggestionType::Jump,
                    )
                    .into_match_result();
                }
                MatchResult::NoMatch
            }
        }
    }
}

fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JumpEntry, SuggestionConfig, SuggestionTables, assert_eq2, segment};

    fn tables() -> SuggestionTables {
        SuggestionTables {
            cwd: "/home/nadia".into(),
            jump_db: vec![
                JumpEntry {
                    path: "/home/nadia".into(),
                    rank: 100,
                },
                JumpEntry {
                    path: "/home/nadia/src".into(),
                    rank: 5,
                },
                JumpEntry {
                    path: "/home/nadia/scratch".into(),
                    rank: 9,
                },
            ],
            ..Default::default()
        }
    }

    fn run(line: &str, config: &SuggestionConfig) -> MatchResult {
        let tables = tables();
        let segmentation = segment(line, line.len());
        let word = segmentation.current_word().unwrap();
        let request = MatchRequest {
            line,
            word,
            words_before: segmentation.words_before(word),
            tables: &tables,
            config,
        };
        JumpSource.try_match(&request, MatchMode::for_word(word))
    }

    #[test]
    fn test_best_rank_wins_and_cwd_is_skipped() {
        let MatchResult::Partial(it) = run("cd /home/", &SuggestionConfig::default()) else {
            panic!("expected a partial match");
        };
        assert_eq2!(it.text, "/home/nadia/scratch/");
        assert_eq2!(it.render_text(), "nadia/scratch/");
    }

    #[test]
    fn test_first_word_needs_autocd() {
        let config = SuggestionConfig {
            autocd: false,
            ..Default::default()
        };
        assert_eq2!(run("/home/nadia/sr", &config), MatchResult::NoMatch);
        assert!(run("/home/nadia/sr", &SuggestionConfig::default()).is_match());
    }

    #[test]
    fn test_closed_path_is_full() {
        assert_eq2!(
            run("cd /home/nadia/src/ ", &SuggestionConfig::default()),
            MatchResult::Full(SuggestionType::Jump)
        );
    }
}
