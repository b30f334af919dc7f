// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap,
          fs, io,
          path::{Path, PathBuf}};

use r3bl_suggest::{Alias, Bookmark, ListingEntry, SuggestionTables};

use crate::{FmConfig, History, JumpDb};

/// Commands `fm` runs itself.
pub const INTERNAL_COMMANDS: [&str; 9] = ["bd", "cd", "ds", "j", "jc", "jo", "jp", "q", "s"];

/// Commands handled by `sh` without a binary in `$PATH`.
pub const SHELL_BUILTINS: [&str; 11] = [
    "alias", "echo", "exit", "export", "pwd", "read", "set", "source", "test", "type",
    "unset",
];

/// Everything the shell knows between two command lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    pub cwd: PathBuf,
    /// In display order, so ELN `n` is `listing[n - 1]`.
    pub listing: Vec<ListingEntry>,
    pub history: History,
    pub jump_db: JumpDb,
    pub selection: Vec<PathBuf>,
    pub config: FmConfig,
    /// Executables found in `$PATH` when the shell started.
    pub path_commands: Vec<String>,
    pub environment: Vec<(String, String)>,
}

impl ShellState {
    /// Reads the listing of `cwd` and records the visit.
    ///
    /// # Errors
    ///
    /// If `cwd` can't be listed.
    pub fn change_dir(&mut self, cwd: PathBuf) -> io::Result<()> {
        self.listing = read_listing(&cwd)?;
        self.jump_db.visit(&cwd.to_string_lossy());
        self.cwd = cwd;
        Ok(())
    }

    /// Re-read the listing, eg: after an external command that may have changed it.
    pub fn refresh_listing(&mut self) {
        match read_listing(&self.cwd) {
            Ok(listing) => self.listing = listing,
            Err(error) => {
                // % is Display, ? is Debug.
                tracing::warn!(
                    message = "Could not refresh listing",
                    cwd = ?self.cwd,
                    error = %error
                );
            }
        }
    }

    /// Snapshot for the suggestion engine.
    #[must_use]
    pub fn build_tables(&self) -> SuggestionTables {
        let config = &self.config;
        SuggestionTables {
            cwd: self.cwd.clone(),
            listing: self.listing.clone(),
            history: self.history.oldest_first(),
            jump_db: self.jump_db.entries().to_vec(),
            bookmarks: config
                .bookmarks
                .iter()
                .map(|(name, path)| Bookmark {
                    name: name.clone(),
                    path: path.clone(),
                })
                .collect(),
            aliases: config
                .aliases
                .iter()
                .map(|(name, expansion)| Alias {
                    name: name.clone(),
                    expansion: expansion.clone(),
                })
                .collect(),
            path_commands: self.path_commands.clone(),
            internal_commands: INTERNAL_COMMANDS.iter().map(ToString::to_string).collect(),
            shell_builtins: SHELL_BUILTINS.iter().map(ToString::to_string).collect(),
            environment: self.environment.clone(),
            user_vars: config
                .user_vars
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            fixed_params: fixed_params(config),
            selection_count: self.selection.len(),
        }
    }
}

/// Visible entries of `dir`, sorted by name. Hidden entries are left out.
///
/// # Errors
///
/// If `dir` can't be read.
pub fn read_listing(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut listing: Vec<ListingEntry> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                return None;
            }
            // Follow symlinks, a link to a directory can be entered.
            let is_dir = fs::metadata(entry.path()).is_ok_and(|it| it.is_dir());
            Some(ListingEntry { name, is_dir })
        })
        .collect();
    listing.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));
    Ok(listing)
}

/// Executables in the directories of a `$PATH` style string, sorted and deduplicated.
#[must_use]
pub fn scan_path_commands(path_var: &str) -> Vec<String> {
    let mut commands: Vec<String> = path_var
        .split(':')
        .filter(|dir| !dir.is_empty())
        .filter_map(|dir| fs::read_dir(dir).ok())
        .flat_map(|read_dir| read_dir.filter_map(Result::ok))
        .filter(|entry| is_executable(&entry.path()))
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    commands.sort();
    commands.dedup();
    commands
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).is_ok_and(|it| it.is_file() && it.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool { fs::metadata(path).is_ok_and(|it| it.is_file()) }

/// The config's own fixed parameters plus the dynamic lists that depend on other
/// settings: bookmark names, color schemes, remotes and profiles.
fn fixed_params(config: &FmConfig) -> BTreeMap<String, Vec<String>> {
    let mut it = config.fixed_params.clone();
    let dynamic = [
        ("bm", config.bookmarks.keys().cloned().collect::<Vec<_>>()),
        ("cs", config.color_schemes.clone()),
        ("net", config.remotes.clone()),
        ("pf set", config.profiles.clone()),
        ("pf del", config.profiles.clone()),
    ];
    for (key, values) in dynamic {
        if !values.is_empty() {
            it.entry(key.to_string()).or_default().extend(values);
        }
    }
    it
}

/// One line per entry: the ELN, then the name, with a `/` after directories.
#[must_use]
pub fn format_listing(listing: &[ListingEntry]) -> String {
    let width = listing.len().to_string().len();
    listing
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let suffix = if entry.is_dir { "/" } else { "" };
            format!("{:>width$} {}{suffix}\n", index + 1, entry.name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use r3bl_suggest::assert_eq2;

    use super::*;

    #[test]
    fn test_read_listing_sorted_without_hidden() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        fs::write(dir.path().join("alpha.txt"), "a").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        let listing = read_listing(dir.path()).unwrap();
        assert_eq2!(listing, vec![ListingEntry::file("alpha.txt"), ListingEntry::dir("beta")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_path_commands() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("tool");
        fs::write(&tool, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let path_var = format!("{}::/nonexistent", dir.path().display());
        assert_eq2!(scan_path_commands(&path_var), vec!["tool".to_string()]);
    }

    #[test]
    fn test_build_tables() {
        let mut state = ShellState::default();
        state.config.bookmarks.insert("docs".into(), "~/docs".into());
        state.config.profiles = vec!["work".into()];
        state.history.update("ls -la");
        state.history.update("git status");
        state.selection.push("/tmp/a".into());

        let tables = state.build_tables();
        assert_eq2!(tables.history, vec!["ls -la".to_string(), "git status".to_string()]);
        assert_eq2!(tables.bookmarks[0].name, "docs");
        assert_eq2!(tables.selection_count, 1);
        assert!(tables.is_internal_command("bd"));
        assert_eq2!(tables.fixed_params.get("bm"), Some(&vec!["docs".to_string()]));
        assert_eq2!(tables.fixed_params.get("pf set"), Some(&vec!["work".to_string()]));
        assert_eq2!(tables.fixed_params.get("cs"), None);
    }

    #[test]
    fn test_change_dir_records_visit() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("alpha.txt"), "a").unwrap();
        let mut state = ShellState::default();
        state.change_dir(dir.path().to_path_buf()).unwrap();
        assert_eq2!(state.listing.len(), 1);
        assert_eq2!(state.jump_db.entries().len(), 1);
        assert!(state.change_dir(dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_format_listing() {
        let listing: Vec<ListingEntry> = (1..=10)
            .map(|n| ListingEntry::file(format!("f{n}")))
            .chain([ListingEntry::dir("beta")])
            .collect();
        let it = format_listing(&listing);
        let lines: Vec<&str> = it.lines().collect();
        assert_eq2!(lines[0], " 1 f1");
        assert_eq2!(lines[10], "11 beta/");
    }
}
