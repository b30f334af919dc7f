// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use r3bl_suggest::{ListingEntry, expand_tilde, find_back_dir, segment, unescape_word};

use crate::{FmError, JumpFilter, ShellState};

/// What the session should do after a command line was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Nothing else to do. The message, if any, is shown to the user.
    Done(Option<String>),
    /// The current directory changed, the new listing should be shown.
    ChangedDir,
    Quit,
    /// Not an internal command. Run it with `sh -c`.
    External(String),
}

/// Run `line` if it is an internal command, a directory to change into, or an ELN.
///
/// # Errors
///
/// If the command names a directory, entry, or jump target that does not exist.
pub fn run_command_line(line: &str, state: &mut ShellState) -> Result<CommandOutcome, FmError> {
    let segmentation = segment(line, line.len());
    // Pipelines and lists are for the shell.
    if segmentation.segment_starts.len() > 1 {
        return Ok(CommandOutcome::External(line.to_string()));
    }
    let words: Vec<String> = segmentation
        .words
        .iter()
        .map(|word| unescape_word(&word.text))
        .collect();
    let Some((command, args)) = words.split_first() else {
        return Ok(CommandOutcome::Done(None));
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    // % is Display, ? is Debug.
    tracing::debug!(message = "Command line", command = %command, args = ?args);

    match command.as_str() {
        "q" => Ok(CommandOutcome::Quit),
        "cd" => {
            let target = match args.first() {
                Some(arg) => resolve(arg, state),
                None => home_dir(state).unwrap_or_else(|| state.cwd.clone()),
            };
            change_dir(state, target)
        }
        "bd" => back_dir(state, &args),
        "j" | "jc" | "jp" | "jo" => jump(state, command, &args),
        "s" => select(state, &args),
        "ds" => deselect(state, &args),
        _ => run_other(line, command, &args, state),
    }
}

/// ELNs, autocd, aliases, and finally the shell.
fn run_other(
    line: &str,
    command: &str,
    args: &[&str],
    state: &mut ShellState,
) -> Result<CommandOutcome, FmError> {
    if args.is_empty() {
        if let Some(entry) = entry_for_eln(command, &state.listing) {
            let path = state.cwd.join(&entry.name);
            return if entry.is_dir {
                change_dir(state, path)
            } else {
                Ok(CommandOutcome::Done(Some(path.display().to_string())))
            };
        }
        if is_eln(command) {
            return Err(FmError::NoSuchEln {
                eln: command.to_string(),
            });
        }
        if state.config.suggestions.autocd {
            let path = resolve(command, state);
            if path.is_dir() {
                return change_dir(state, path);
            }
        }
    }

    if let Some(expansion) = state.config.aliases.get(command) {
        let rest = line.trim_start().strip_prefix(command).unwrap_or_default();
        return Ok(CommandOutcome::External(format!("{expansion}{rest}")));
    }

    Ok(CommandOutcome::External(line.to_string()))
}

fn change_dir(state: &mut ShellState, path: PathBuf) -> Result<CommandOutcome, FmError> {
    let path = normalize(&path);
    if !path.is_dir() {
        return Err(FmError::NoSuchDir {
            path: path.display().to_string(),
        });
    }
    state.change_dir(path.clone()).map_err(|_| FmError::NoSuchDir {
        path: path.display().to_string(),
    })?;
    Ok(CommandOutcome::ChangedDir)
}

fn back_dir(state: &mut ShellState, args: &[&str]) -> Result<CommandOutcome, FmError> {
    let query = args.first().copied().unwrap_or_default();
    let cwd = state.cwd.to_string_lossy().to_string();
    let case_sensitive = state.config.suggestions.case_sensitive;
    let Some(target) = find_back_dir(&cwd, query, case_sensitive) else {
        return Err(FmError::NoBackDir {
            query: query.to_string(),
        });
    };
    let target = PathBuf::from(target);
    change_dir(state, target)
}

fn jump(state: &mut ShellState, command: &str, args: &[&str]) -> Result<CommandOutcome, FmError> {
    let no_match = || FmError::NoJumpMatch {
        terms: args.join(" "),
    };
    let target = if command == "jo" {
        let number = args.first().and_then(|it| it.parse::<usize>().ok());
        number.and_then(|it| state.jump_db.nth_by_rank(it))
    } else {
        let filter = match command {
            "jc" => JumpFilter::Children,
            "jp" => JumpFilter::Parents,
            _ => JumpFilter::Any,
        };
        if args.is_empty() {
            return Err(no_match());
        }
        state.jump_db.best_match(
            args,
            &state.cwd.to_string_lossy(),
            filter,
            state.config.suggestions.case_sensitive,
        )
    };
    let Some(target) = target.map(PathBuf::from) else {
        return Err(no_match());
    };
    change_dir(state, target)
}

fn select(state: &mut ShellState, args: &[&str]) -> Result<CommandOutcome, FmError> {
    for arg in args {
        let path = match entry_for_eln(arg, &state.listing) {
            Some(entry) => state.cwd.join(&entry.name),
            None => resolve(arg, state),
        };
        if !path.exists() {
            return Err(FmError::NoSuchFile {
                name: (*arg).to_string(),
            });
        }
        if !state.selection.contains(&path) {
            state.selection.push(path);
        }
    }
    Ok(CommandOutcome::Done(Some(selection_message(state))))
}

/// No arguments clears the whole selection.
fn deselect(state: &mut ShellState, args: &[&str]) -> Result<CommandOutcome, FmError> {
    if args.is_empty() {
        state.selection.clear();
    } else {
        let paths: Vec<PathBuf> = args.iter().map(|arg| resolve(arg, state)).collect();
        state.selection.retain(|it| !paths.contains(it));
    }
    Ok(CommandOutcome::Done(Some(selection_message(state))))
}

fn selection_message(state: &ShellState) -> String {
    match state.selection.len() {
        1 => "1 file selected".to_string(),
        count => format!("{count} files selected"),
    }
}

/// The listing entry an ELN refers to. Anything that is not a positive number without
/// leading zeros is not an ELN.
fn entry_for_eln<'a>(text: &str, listing: &'a [ListingEntry]) -> Option<&'a ListingEntry> {
    if !is_eln(text) {
        return None;
    }
    let index = text.parse::<usize>().ok()?.checked_sub(1)?;
    listing.get(index)
}

fn is_eln(text: &str) -> bool {
    !text.is_empty() && !text.starts_with('0') && text.chars().all(|ch| ch.is_ascii_digit())
}

fn home_dir(state: &ShellState) -> Option<PathBuf> {
    state
        .environment
        .iter()
        .find(|(key, _)| key == "HOME")
        .map(|(_, value)| PathBuf::from(value))
        .or_else(dirs::home_dir)
}

/// `arg` as typed, made absolute against the current directory.
fn resolve(arg: &str, state: &ShellState) -> PathBuf {
    let expanded = expand_tilde(arg, home_dir(state).as_deref());
    if expanded.is_absolute() {
        expanded
    } else {
        state.cwd.join(expanded)
    }
}

/// Drop `.` and resolve `..` without touching the file system, so symlinked paths stay
/// the way the user typed them.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut it = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                it.pop();
            }
            other => it.push(other),
        }
    }
    it
}

#[cfg(test)]
mod tests {
    use std::fs;

    use r3bl_suggest::assert_eq2;
    use test_case::test_case;

    use super::*;

    fn state_in_tempdir() -> (tempfile::TempDir, ShellState) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("beta/gamma")).unwrap();
        fs::write(dir.path().join("alpha.txt"), "a").unwrap();
        let mut state = ShellState::default();
        state.change_dir(dir.path().to_path_buf()).unwrap();
        (dir, state)
    }

    #[test]
    fn test_cd_eln_and_autocd() {
        let (dir, mut state) = state_in_tempdir();
        assert_eq2!(
            run_command_line("cd beta", &mut state).unwrap(),
            CommandOutcome::ChangedDir
        );
        assert_eq2!(state.cwd, dir.path().join("beta"));

        assert_eq2!(
            run_command_line("cd ..", &mut state).unwrap(),
            CommandOutcome::ChangedDir
        );
        assert_eq2!(state.cwd, dir.path().to_path_buf());

        // Listing is alpha.txt, beta.
        run_command_line("2", &mut state).unwrap();
        assert_eq2!(state.cwd, dir.path().join("beta"));

        run_command_line("gamma", &mut state).unwrap();
        assert_eq2!(state.cwd, dir.path().join("beta/gamma"));
    }

    #[test]
    fn test_eln_of_file_shows_path() {
        let (dir, mut state) = state_in_tempdir();
        assert_eq2!(
            run_command_line("1", &mut state).unwrap(),
            CommandOutcome::Done(Some(dir.path().join("alpha.txt").display().to_string()))
        );
    }

    #[test]
    fn test_eln_out_of_range_is_an_error() {
        let (_dir, mut state) = state_in_tempdir();
        assert!(matches!(
            run_command_line("7", &mut state),
            Err(FmError::NoSuchEln { .. })
        ));
    }

    #[test]
    fn test_cd_to_missing_dir_is_an_error() {
        let (_dir, mut state) = state_in_tempdir();
        assert!(matches!(
            run_command_line("cd nope", &mut state),
            Err(FmError::NoSuchDir { .. })
        ));
    }

    #[test]
    fn test_bd_and_jump() {
        let (dir, mut state) = state_in_tempdir();
        run_command_line("cd beta/gamma", &mut state).unwrap();

        run_command_line("bd bet", &mut state).unwrap();
        assert_eq2!(state.cwd, dir.path().join("beta"));

        run_command_line("j gam", &mut state).unwrap();
        assert_eq2!(state.cwd, dir.path().join("beta/gamma"));

        run_command_line("jp bet", &mut state).unwrap();
        assert_eq2!(state.cwd, dir.path().join("beta"));

        assert!(matches!(
            run_command_line("j nowhere", &mut state),
            Err(FmError::NoJumpMatch { .. })
        ));
        assert!(matches!(
            run_command_line("bd /", &mut state),
            Err(FmError::NoBackDir { .. })
        ));
    }

    #[test]
    fn test_select_and_deselect() {
        let (dir, mut state) = state_in_tempdir();
        assert_eq2!(
            run_command_line("s 1 beta", &mut state).unwrap(),
            CommandOutcome::Done(Some("2 files selected".into()))
        );
        run_command_line("s 1", &mut state).unwrap();
        assert_eq2!(state.selection.len(), 2);

        run_command_line("ds beta", &mut state).unwrap();
        assert_eq2!(state.selection, vec![dir.path().join("alpha.txt")]);
        run_command_line("ds", &mut state).unwrap();
        assert!(state.selection.is_empty());

        assert!(matches!(
            run_command_line("s 9", &mut state),
            Err(FmError::NoSuchFile { .. })
        ));
    }

    #[test_case("ls -la | wc -l", "ls -la | wc -l")]
    #[test_case("ll src", "ls -la src")]
    #[test_case("echo hi", "echo hi")]
    fn test_external_commands(line: &str, expected: &str) {
        let (_dir, mut state) = state_in_tempdir();
        state.config.aliases.insert("ll".into(), "ls -la".into());
        assert_eq2!(
            run_command_line(line, &mut state).unwrap(),
            CommandOutcome::External(expected.into())
        );
    }

    #[test]
    fn test_quit_and_empty_line() {
        let (_dir, mut state) = state_in_tempdir();
        assert_eq2!(run_command_line("q", &mut state).unwrap(), CommandOutcome::Quit);
        assert_eq2!(
            run_command_line("   ", &mut state).unwrap(),
            CommandOutcome::Done(None)
        );
    }
}
