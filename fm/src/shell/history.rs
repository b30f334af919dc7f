// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use crate::HISTORY_SIZE_MAX;

/// Lines submitted in this session, newest at the front. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub entries: VecDeque<String>,
    pub max_size: usize,
}

impl Default for History {
    fn default() -> Self { Self::new(HISTORY_SIZE_MAX) }
}

impl History {
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::default(),
            max_size,
        }
    }

    pub fn update(&mut self, line: &str) {
        let line = line.trim_end();
        // Don't add entry if last entry was same, or line was empty.
        if line.trim_start().is_empty() || self.entries.front().is_some_and(|it| it == line)
        {
            return;
        }
        self.entries.push_front(line.to_string());

        if self.entries.len() > self.max_size {
            // Remove oldest entry.
            self.entries.pop_back();
        }
    }

    /// Oldest first, the order suggestion tables expect.
    #[must_use]
    pub fn oldest_first(&self) -> Vec<String> { self.entries.iter().rev().cloned().collect() }
}
