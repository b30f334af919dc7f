// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Alias, Bookmark, JumpEntry, LineBuffer, ListingEntry, SuggestionTables};

/// A line buffer that is just a string and a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestLine {
    pub text: String,
    pub cursor: usize,
}

impl TestLine {
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        Self {
            text: text.into(),
            cursor,
        }
    }

    /// Cursor after the last char.
    pub fn at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }
}

impl LineBuffer for TestLine {
    fn text(&self) -> &str { &self.text }

    fn cursor(&self) -> usize { self.cursor }
}

/// Tables that only live in memory: nothing in them exists on disk.
#[must_use]
pub fn sample_tables() -> SuggestionTables {
    SuggestionTables {
        cwd: "/nonexistent/home/user".into(),
        listing: vec![
            ListingEntry::file("alpha.txt"),
            ListingEntry::dir("beta"),
            ListingEntry::file("my file.md"),
        ],
        history: vec!["ls -la".into()],
        jump_db: vec![
            JumpEntry {
                path: "/nonexistent/home/user".into(),
                rank: 40,
            },
            JumpEntry {
                path: "/nonexistent/projects/fm".into(),
                rank: 12,
            },
        ],
        bookmarks: vec![Bookmark {
            name: "projects".into(),
            path: "/nonexistent/projects".into(),
        }],
        aliases: vec![Alias {
            name: "ll".into(),
            expansion: "ls -la".into(),
        }],
        path_commands: vec!["cat".into(), "git".into(), "ls".into()],
        internal_commands: vec![
            "cd".into(),
            "bd".into(),
            "j".into(),
            "jc".into(),
            "jp".into(),
            "jo".into(),
            "s".into(),
            "ds".into(),
            "q".into(),
        ],
        shell_builtins: vec!["echo".into(), "export".into()],
        environment: vec![("HOME".into(), "/nonexistent/home/user".into())],
        ..Default::default()
    }
}
