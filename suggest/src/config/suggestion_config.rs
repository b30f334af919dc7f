// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words autocd ehfjbac

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{FileTypeColors, SuggestionColors};
use crate::StrategyOrder;

/// Default order in which suggestion sources are consulted. See [`StrategyOrder`].
pub const DEFAULT_STRATEGY: &str = "ehfjbac";

pub const DEFAULT_WARNING_PROMPT: &str = "(!) > ";

/// Everything that changes how suggestions are found and drawn. Every field has a
/// default, so a config file only needs to mention what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Master switch. When off, the engine never touches the terminal.
    pub enabled: bool,
    pub case_sensitive: bool,
    /// A bare directory name typed as the first word changes into it, so directory
    /// names are valid first word suggestions.
    pub autocd: bool,
    /// A bare file name typed as the first word opens it, so file names are valid
    /// first word suggestions.
    pub auto_open: bool,
    /// Letters naming the sources to consult, in order. See [`StrategyOrder`].
    pub strategy: String,
    pub color_by_file_type: bool,
    pub warning_prompt_enabled: bool,
    /// Text of the prompt shown while the first word is not a known command. Drawn in
    /// [`SuggestionColors::warning_prompt`].
    pub warning_prompt: String,
    pub colors: SuggestionColors,
    pub file_type_colors: FileTypeColors,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            case_sensitive: false,
            autocd: true,
            auto_open: true,
            strategy: DEFAULT_STRATEGY.to_string(),
            color_by_file_type: false,
            warning_prompt_enabled: true,
            warning_prompt: DEFAULT_WARNING_PROMPT.to_string(),
            colors: SuggestionColors::default(),
            file_type_colors: FileTypeColors::default(),
        }
    }
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("Invalid suggestion strategy code '{code}' at position {position}")]
    #[diagnostic(
        code(r3bl_suggest::config::invalid_strategy),
        help("Use the letters a, b, c, e, f, h, j, or - to skip a slot")
    )]
    InvalidStrategyCode { code: char, position: usize },

    #[error("Could not read config file {path:?}")]
    #[diagnostic(code(r3bl_suggest::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config")]
    #[diagnostic(code(r3bl_suggest::config::parse))]
    Parse(#[from] serde_json::Error),
}

impl SuggestionConfig {
    /// Parse a JSON config and check that the strategy string is valid.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, [`ConfigError::InvalidStrategyCode`]
    /// for an unknown strategy letter.
    pub fn try_from_json_str(input: &str) -> Result<Self, ConfigError> {
        let it: Self = serde_json::from_str(input)?;
        it.try_strategy_order()?;
        Ok(it)
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidStrategyCode`] for an unknown strategy letter.
    pub fn try_strategy_order(&self) -> Result<StrategyOrder, ConfigError> {
        self.strategy.parse()
    }

    /// The warning prompt with its color applied.
    #[must_use]
    pub fn decorated_warning_prompt(&self) -> String {
        format!(
            "{}{}\x1b[0m",
            self.colors.warning_prompt.escape_sequence(),
            self.warning_prompt
        )
    }
}
