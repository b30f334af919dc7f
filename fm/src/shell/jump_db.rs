// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use r3bl_suggest::JumpEntry;

/// Rank given to a directory on each visit.
pub const VISIT_RANK: i64 = 10;

/// Directories visited in this session. Each visit bumps the rank of the directory, so
/// the most used ones come first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpDb {
    entries: Vec<JumpEntry>,
}

/// Which entries a jump command can go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpFilter {
    Any,
    /// `jc`: below the current directory.
    Children,
    /// `jp`: above the current directory.
    Parents,
}

impl JumpDb {
    pub fn visit(&mut self, path: &str) {
        let path = trim_trailing_slash(path);
        match self.entries.iter_mut().find(|it| it.path == path) {
            Some(entry) => entry.rank += VISIT_RANK,
            None => self.entries.push(JumpEntry {
                path: path.to_string(),
                rank: VISIT_RANK,
            }),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[JumpEntry] { &self.entries }

    /// Best rank first. Ties keep the order of the first visit.
    #[must_use]
    pub fn by_rank(&self) -> Vec<&JumpEntry> {
        let mut it: Vec<&JumpEntry> = self.entries.iter().collect();
        it.sort_by(|lhs, rhs| rhs.rank.cmp(&lhs.rank));
        it
    }

    /// The best ranked entry that contains every term, other than `cwd`.
    #[must_use]
    pub fn best_match(
        &self,
        terms: &[&str],
        cwd: &str,
        filter: JumpFilter,
        case_sensitive: bool,
    ) -> Option<&str> {
        let cwd = trim_trailing_slash(cwd);
        self.by_rank()
            .into_iter()
            .map(|it| it.path.as_str())
            .filter(|path| *path != cwd)
            .filter(|path| match filter {
                JumpFilter::Any => true,
                JumpFilter::Children => is_below(path, cwd),
                JumpFilter::Parents => is_below(cwd, path),
            })
            .find(|path| {
                terms.iter().all(|term| {
                    if case_sensitive {
                        path.contains(term)
                    } else {
                        path.to_lowercase().contains(&term.to_lowercase())
                    }
                })
            })
    }

    /// `jo n`: the n-th entry by rank, 1-based.
    #[must_use]
    pub fn nth_by_rank(&self, n: usize) -> Option<&str> {
        let index = n.checked_sub(1)?;
        self.by_rank().get(index).map(|it| it.path.as_str())
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

fn is_below(path: &str, ancestor: &str) -> bool {
    if ancestor == "/" {
        return path.len() > 1;
    }
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}
