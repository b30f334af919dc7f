// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap, path::PathBuf};

/// One entry of the directory listing the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

impl ListingEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// A previously visited directory. Higher rank means visited more often or more
/// recently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpEntry {
    pub path: String,
    pub rank: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub expansion: String,
}

/// Everything the suggestion sources read. The engine never changes any of it; the
/// host refreshes the tables whenever the underlying data changes (eg: after `cd`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionTables {
    pub cwd: PathBuf,
    /// In display order. Entry list number `n` refers to `listing[n - 1]`.
    pub listing: Vec<ListingEntry>,
    /// Oldest first, newest last.
    pub history: Vec<String>,
    pub jump_db: Vec<JumpEntry>,
    pub bookmarks: Vec<Bookmark>,
    pub aliases: Vec<Alias>,
    /// Executables found in `$PATH`.
    pub path_commands: Vec<String>,
    /// Commands implemented by the host itself (eg: `cd`, `bd`, `j`).
    pub internal_commands: Vec<String>,
    pub shell_builtins: Vec<String>,
    pub environment: Vec<(String, String)>,
    /// Variables defined in the session, on top of the environment.
    pub user_vars: Vec<(String, String)>,
    /// Arguments for internal commands, keyed by the words that come before them. Keys
    /// can have more than one word, eg: `"pf set"` lists profile names.
    pub fixed_params: BTreeMap<String, Vec<String>>,
    /// Number of selected files.
    pub selection_count: usize,
}

impl SuggestionTables {
    #[must_use]
    pub fn is_internal_command(&self, name: &str) -> bool {
        self.internal_commands.iter().any(|it| it == name)
    }

    /// Jump database entries, best rank first. Entries with the same rank keep their
    /// table order.
    #[must_use]
    pub fn jump_entries_by_rank(&self) -> Vec<&JumpEntry> {
        let mut it: Vec<&JumpEntry> = self.jump_db.iter().collect();
        it.sort_by(|lhs, rhs| rhs.rank.cmp(&lhs.rank));
        it
    }

    /// Looks in the session variables first, then the environment.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.user_vars
            .iter()
            .chain(self.environment.iter())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn home_dir(&self) -> Option<PathBuf> { self.variable("HOME").map(PathBuf::from) }

    #[must_use]
    pub fn cwd_str(&self) -> String { self.cwd.to_string_lossy().to_string() }
}
