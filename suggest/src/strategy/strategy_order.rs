// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words ehfjbac

use std::{fmt::{Display, Formatter},
          str::FromStr};

use crate::{AliasSource, BookmarkSource, CompletionSource, ConfigError, ElnSource,
            FilenameSource, HistorySource, JumpSource, SuggestionSource};

/// One slot of the strategy string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyCode {
    Aliases,
    Bookmarks,
    Completions,
    Eln,
    Filenames,
    History,
    Jump,
    /// `-` keeps a slot empty.
    Skip,
}

impl StrategyCode {
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'a' => Some(StrategyCode::Aliases),
            'b' => Some(StrategyCode::Bookmarks),
            'c' => Some(StrategyCode::Completions),
            'e' => Some(StrategyCode::Eln),
            'f' => Some(StrategyCode::Filenames),
            'h' => Some(StrategyCode::History),
            'j' => Some(StrategyCode::Jump),
            '-' => Some(StrategyCode::Skip),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            StrategyCode::Aliases => 'a',
            StrategyCode::Bookmarks => 'b',
            StrategyCode::Completions => 'c',
            StrategyCode::Eln => 'e',
            StrategyCode::Filenames => 'f',
            StrategyCode::History => 'h',
            StrategyCode::Jump => 'j',
            StrategyCode::Skip => '-',
        }
    }

    #[must_use]
    pub fn build_source(self) -> Option<Box<dyn SuggestionSource>> {
        match self {
            StrategyCode::Aliases => Some(Box::new(AliasSource)),
            StrategyCode::Bookmarks => Some(Box::new(BookmarkSource)),
            StrategyCode::Completions => Some(Box::new(CompletionSource)),
            StrategyCode::Eln => Some(Box::new(ElnSource)),
            StrategyCode::Filenames => Some(Box::new(FilenameSource)),
            StrategyCode::History => Some(Box::new(HistorySource)),
            StrategyCode::Jump => Some(Box::new(JumpSource)),
            StrategyCode::Skip => None,
        }
    }
}

/// Order in which the sources are asked for a match, written as a string of letters:
/// `a` aliases, `b` bookmarks, `c` completions, `e` entry list numbers, `f` file
/// names, `h` history, `j` jump database. `-` skips a slot.
///
/// ```
/// use r3bl_suggest::{StrategyCode, StrategyOrder};
///
/// let it: StrategyOrder = "h-f".parse().unwrap();
/// assert_eq!(it.codes(), &[StrategyCode::History, StrategyCode::Skip, StrategyCode::Filenames]);
/// assert_eq!(it.build_sources().len(), 2);
/// assert!("hx".parse::<StrategyOrder>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOrder {
    codes: Vec<StrategyCode>,
}

impl StrategyOrder {
    #[must_use]
    pub fn codes(&self) -> &[StrategyCode] { &self.codes }

    /// One source per letter, in order. Skipped slots produce nothing.
    #[must_use]
    pub fn build_sources(&self) -> Vec<Box<dyn SuggestionSource>> {
        self.codes
            .iter()
            .filter_map(|code| code.build_source())
            .collect()
    }
}

impl Default for StrategyOrder {
    /// Same as [`crate::DEFAULT_STRATEGY`].
    fn default() -> Self {
        Self {
            codes: vec![
                StrategyCode::Eln,
                StrategyCode::History,
                StrategyCode::Filenames,
                StrategyCode::Jump,
                StrategyCode::Bookmarks,
                StrategyCode::Aliases,
                StrategyCode::Completions,
            ],
        }
    }
}

impl FromStr for StrategyOrder {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let codes = input
            .chars()
            .enumerate()
            .map(|(position, code)| {
                StrategyCode::from_char(code)
                    .ok_or(ConfigError::InvalidStrategyCode { code, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { codes })
    }
}

impl Display for StrategyOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for code in &self.codes {
            write!(f, "{}", code.as_char())?;
        }
        Ok(())
    }
}
