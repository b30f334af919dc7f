// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Arguments of internal commands. These are checked before the strategy loop, since
//! for some commands (`bd`, `j`) nothing but their own suggestion makes sense.

use crate::{MatchMode, MatchRequest, MatchResult, Suggestion, SuggestionType, escape_str,
            match_prefix, strings_eq, suggestion_dir_color, unescape_word};

const HELP_FLAG: &str = "--help";
const SEL_KEYWORD: &str = "sel";

#[derive(Debug, Default, Clone, Copy)]
pub struct ParamSource;

impl ParamSource {
    /// Returns [`None`] when the word is not an argument this source knows about, so the
    /// strategy loop should run. `Some(MatchResult::NoMatch)` means the command owns its
    /// arguments and nothing else must be suggested.
    #[must_use]
    pub fn try_match(&self, request: &MatchRequest<'_>, mode: MatchMode) -> Option<MatchResult> {
        if request.is_first_word() {
            return None;
        }
        let command = request.command_name()?;

        match command {
            "bd" if request.words_before.len() == 1 => {
                return Some(back_dir(request, mode));
            }
            "j" | "jc" | "jp" | "jo" if !is_help_request(request) => {
                return Some(jump_command(request, command));
            }
            _ => {}
        }

        sel_keyword(request)
            .or_else(|| fixed_param(request, mode))
            .or_else(|| help_flag(request))
    }
}

/// `bd <query>` goes back to the closest parent directory whose path contains `query`.
fn back_dir(request: &MatchRequest<'_>, mode: MatchMode) -> MatchResult {
    let query = unescape_word(&request.word.text);
    let cwd = request.tables.cwd_str();
    let Some(target) = find_back_dir(&cwd, &query, request.case_sensitive()) else {
        return MatchResult::NoMatch;
    };

    match mode {
        MatchMode::Check => MatchResult::Full(SuggestionType::BackDir),
        MatchMode::Print => Suggestion::replacement(
            escape_str(target),
            request.word.start,
            suggestion_dir_color(request.config),
            SuggestionType::BackDir,
        )
        .into_match_result(),
    }
}

/// The parent of `cwd` that ends with the path component containing the last occurrence
/// of `query`. `cwd` itself and `/` are never returned.
///
/// ```
/// use r3bl_suggest::find_back_dir;
///
/// assert_eq!(find_back_dir("/home/user/src/fm", "us", true), Some("/home/user"));
/// assert_eq!(find_back_dir("/home/user/src/fm", "fm", true), None);
/// assert_eq!(find_back_dir("/home/user/src/fm", "/", true), None);
/// ```
#[must_use]
pub fn find_back_dir<'a>(cwd: &'a str, query: &str, case_sensitive: bool) -> Option<&'a str> {
    // `bd /` would be the root, there is nothing to suggest.
    if query.is_empty() || query.starts_with('/') {
        return None;
    }
    let found = if case_sensitive {
        cwd.rfind(query)?
    } else {
        cwd.to_ascii_lowercase().rfind(&query.to_ascii_lowercase())?
    };
    // Extend to the end of the path component the query was found in.
    let end = cwd[found..].find('/').map(|offset| found + offset)?;
    Some(&cwd[..end]).filter(|it| !it.is_empty())
}

/// `j -h` and `j --help` get the regular argument suggestions.
fn is_help_request(request: &MatchRequest<'_>) -> bool {
    let first_arg = request
        .words_before
        .get(1)
        .unwrap_or(request.word)
        .text
        .as_str();
    first_arg.starts_with("-h") || (first_arg.starts_with('-') && HELP_FLAG.starts_with(first_arg))
}

/// The jump commands take words that must all appear in the target path: `j` matches
/// anywhere, `jc` only below the current directory, `jp` only above it. `jo N` is the
/// N-th best ranked entry. The suggestion replaces the whole command.
fn jump_command(request: &MatchRequest<'_>, command: &str) -> MatchResult {
    let tables = request.tables;
    let terms: Vec<String> = request.words_before[1..]
        .iter()
        .chain(std::iter::once(request.word))
        .map(|word| unescape_word(&word.text))
        .filter(|it| !it.is_empty())
        .collect();
    if terms.is_empty() {
        return MatchResult::NoMatch;
    }

    let cwd = tables.cwd_str();
    let entries = tables.jump_entries_by_rank();
    let target = if command == "jo" {
        let [term] = terms.as_slice() else {
            return MatchResult::NoMatch;
        };
        term.parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| entries.get(index).copied())
    } else {
        entries.into_iter().find(|entry| {
            entry.path != cwd
                && terms
                    .iter()
                    .all(|term| contains(&entry.path, term, request.case_sensitive()))
                && match command {
                    "jc" => is_below(&entry.path, &cwd),
                    "jp" => is_below(&cwd, &entry.path),
                    _ => true,
                }
        })
    };
    let Some(entry) = target else {
        return MatchResult::NoMatch;
    };

    let path = escape_str(&entry.path);
    let text = if request.config.autocd {
        path
    } else {
        format!("cd {path}")
    };
    let replace_from = request.words_before.first().map_or(0, |word| word.start);
    Suggestion::replacement(
        text,
        replace_from,
        suggestion_dir_color(request.config),
        SuggestionType::Jump,
    )
    .into_match_result()
}

fn contains(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        haystack.contains(needle)
    } else {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// `path` is strictly below `ancestor`.
fn is_below(path: &str, ancestor: &str) -> bool {
    if ancestor == "/" {
        return path.len() > 1 && path.starts_with('/');
    }
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
}

/// `sel` stands for the selected files, and is only offered while there are any.
fn sel_keyword(request: &MatchRequest<'_>) -> Option<MatchResult> {
    if request.tables.selection_count == 0 {
        return None;
    }
    let typed_len = match_prefix(SEL_KEYWORD, &request.word.text, true)?;
    Some(
        Suggestion::suffix(
            SEL_KEYWORD.to_string(),
            typed_len,
            request.word.start,
            request.config.colors.internal_command.clone(),
            SuggestionType::Sel,
        )
        .into_match_result(),
    )
}

/// Fixed argument lists, keyed by the words before the current one.
fn fixed_param(request: &MatchRequest<'_>, mode: MatchMode) -> Option<MatchResult> {
    let typed = unescape_word(&request.word.text);
    let params = request.tables.fixed_params.iter().find_map(|(key, params)| {
        key.split_whitespace()
            .eq(request.words_before.iter().map(|word| word.text.as_str()))
            .then_some(params)
    })?;

    params.iter().find_map(|param| match mode {
        MatchMode::Check => strings_eq(param, &typed, true)
            .then_some(MatchResult::Full(SuggestionType::Command)),
        MatchMode::Print => {
            let typed_len = match_prefix(param, &typed, true)?;
            Some(
                Suggestion::suffix(
                    escape_str(param),
                    escape_str(&param[..typed_len]).len(),
                    request.word.start,
                    request.config.colors.internal_command.clone(),
                    SuggestionType::Command,
                )
                .into_match_result(),
            )
        }
    })
}

/// `--help` for internal commands.
fn help_flag(request: &MatchRequest<'_>) -> Option<MatchResult> {
    let typed = request.word.text.as_str();
    if !typed.starts_with('-') || !request.tables.is_internal_command(request.command_name()?) {
        return None;
    }
    let typed_len = match_prefix(HELP_FLAG, typed, true)?;
    Some(
        Suggestion::suffix(
            HELP_FLAG.to_string(),
            typed_len,
            request.word.start,
            request.config.colors.internal_command.clone(),
            SuggestionType::Command,
        )
        .into_match_result(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JumpEntry, SuggestionConfig, SuggestionDisplay, SuggestionTables,
                assert_eq2, segment};

    fn tables() -> SuggestionTables {
        SuggestionTables {
            cwd: "/home/user/src/fm".into(),
            internal_commands: vec!["bd".into(), "j".into(), "pf".into(), "cs".into()],
            jump_db: vec![
                JumpEntry {
                    path: "/home/user/src/fm".into(),
                    rank: 50,
                },
                JumpEntry {
                    path: "/home/user/src/fm/suggest".into(),
                    rank: 3,
                },
                JumpEntry {
                    path: "/var/log".into(),
                    rank: 7,
                },
                JumpEntry {
                    path: "/home/user".into(),
                    rank: 2,
                },
            ],
            fixed_params: [
                ("cs".to_string(), vec!["default".to_string(), "dark".to_string()]),
                ("pf set".to_string(), vec!["work".to_string()]),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        }
    }

    fn run_with(
        tables: &SuggestionTables,
        line: &str,
        config: &SuggestionConfig,
    ) -> Option<MatchResult> {
        let segmentation = segment(line, line.len());
        let word = segmentation.current_word().unwrap();
        let request = MatchRequest {
            line,
            word,
            words_before: segmentation.words_before(word),
            tables,
            config,
        };
        ParamSource.try_match(&request, MatchMode::for_word(word))
    }

    fn run(line: &str) -> Option<MatchResult> {
        run_with(&tables(), line, &SuggestionConfig::default())
    }

    fn partial(result: Option<MatchResult>) -> Suggestion {
        match result {
            Some(MatchResult::Partial(it)) => it,
            other => panic!("expected a partial match, got {other:?}"),
        }
    }

    #[test]
    fn test_first_word_is_not_an_argument() {
        assert_eq2!(run("bd"), None);
    }

    #[test]
    fn test_back_dir() {
        let it = partial(run("bd sr"));
        assert_eq2!(it.text, "/home/user/src");
        assert_eq2!(it.display, SuggestionDisplay::Replacement);
        assert_eq2!(it.suggestion_type, SuggestionType::BackDir);
    }

    #[test]
    fn test_back_dir_never_suggests_cwd_or_root() {
        assert_eq2!(run("bd fm"), Some(MatchResult::NoMatch));
        assert_eq2!(run("bd /"), Some(MatchResult::NoMatch));
        assert_eq2!(run("bd nope"), Some(MatchResult::NoMatch));
    }

    #[test]
    fn test_jump_command_replaces_whole_command() {
        let it = partial(run("j log"));
        assert_eq2!(it.text, "/var/log");
        assert_eq2!(it.replace_from, 0);

        let config = SuggestionConfig {
            autocd: false,
            ..Default::default()
        };
        let it = partial(run_with(&tables(), "j log", &config));
        assert_eq2!(it.text, "cd /var/log");
    }

    #[test]
    fn test_jump_child_parent_and_order() {
        assert_eq2!(partial(run("jc s")).text, "/home/user/src/fm/suggest");
        assert_eq2!(partial(run("jp user")).text, "/home/user");
        assert_eq2!(partial(run("jo 2")).text, "/var/log");
        assert_eq2!(run("jc log"), Some(MatchResult::NoMatch));
    }

    #[test]
    fn test_jump_help_falls_through() {
        let it = partial(run("j --he"));
        assert_eq2!(it.render_text(), "lp");
    }

    #[test]
    fn test_sel_only_with_selection() {
        assert_eq2!(run("cp se"), None);

        let mut tables = tables();
        tables.selection_count = 2;
        let it = partial(run_with(&tables, "cp se", &SuggestionConfig::default()));
        assert_eq2!(it.render_text(), "l");
        assert_eq2!(it.suggestion_type, SuggestionType::Sel);
    }

    #[test]
    fn test_fixed_params() {
        assert_eq2!(partial(run("cs da")).render_text(), "rk");
        assert_eq2!(partial(run("pf set w")).render_text(), "ork");
        assert_eq2!(run("cs dark "), Some(MatchResult::Full(SuggestionType::Command)));
        // The key must match every word before the current one.
        assert_eq2!(run("pf w"), None);
    }

    #[test]
    fn test_help_flag_for_internal_commands() {
        assert_eq2!(partial(run("pf --h")).render_text(), "elp");
        assert_eq2!(run("ls --h"), None);
    }
}
