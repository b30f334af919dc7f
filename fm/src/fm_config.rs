// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap,
          fmt::{Display, Formatter, Result},
          fs,
          path::{Path, PathBuf}};

use dirs::config_dir;
use r3bl_suggest::{ConfigError, SuggestionConfig};
use serde::{Deserialize, Serialize};

/// Oldest history entries are dropped past this many.
pub const HISTORY_SIZE_MAX: usize = 1_000;

pub enum ConfigPaths {
    R3BLTopLevelFolderName,
    SuggestionsFile,
}

impl Display for ConfigPaths {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let path = match self {
            ConfigPaths::R3BLTopLevelFolderName => "r3bl-fm",
            ConfigPaths::SuggestionsFile => "suggestions.json",
        };
        write!(f, "{path}")
    }
}

/// This is where the config folder is.
#[must_use]
pub fn try_get_config_folder_path() -> Option<PathBuf> {
    let home_config_folder_path = config_dir()?;
    Some(home_config_folder_path.join(ConfigPaths::R3BLTopLevelFolderName.to_string()))
}

/// This is where the config file is stored.
#[must_use]
pub fn get_config_file_path(config_folder: &Path) -> PathBuf {
    config_folder.join(ConfigPaths::SuggestionsFile.to_string())
}

/// Everything `fm` reads from its config file. Every field has a default, so a missing
/// file or an empty object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FmConfig {
    pub suggestions: SuggestionConfig,
    /// Name to expansion.
    pub aliases: BTreeMap<String, String>,
    /// Name to path. Paths may start with `~`.
    pub bookmarks: BTreeMap<String, String>,
    pub user_vars: BTreeMap<String, String>,
    /// Extra arguments for internal commands, keyed by the words before them.
    pub fixed_params: BTreeMap<String, Vec<String>>,
    /// Suggested after `cs`.
    pub color_schemes: Vec<String>,
    /// Suggested after `net`.
    pub remotes: Vec<String>,
    /// Suggested after `pf set` and `pf del`.
    pub profiles: Vec<String>,
    pub history_size_max: usize,
}

impl Default for FmConfig {
    fn default() -> Self {
        Self {
            suggestions: SuggestionConfig::default(),
            aliases: BTreeMap::new(),
            bookmarks: BTreeMap::new(),
            user_vars: BTreeMap::new(),
            fixed_params: BTreeMap::new(),
            color_schemes: Vec::new(),
            remotes: Vec::new(),
            profiles: Vec::new(),
            history_size_max: HISTORY_SIZE_MAX,
        }
    }
}

impl FmConfig {
    /// A missing file is not an error, it yields the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file exists but can't be read,
    /// [`ConfigError::Parse`] for malformed JSON, and
    /// [`ConfigError::InvalidStrategyCode`] for a bad strategy string.
    pub fn try_load(path: &Path) -> std::result::Result<Self, ConfigError> {
        if !path.exists() {
            // % is Display, ? is Debug.
            tracing::debug!(message = "No config file, using defaults", path = ?path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::try_from_json_str(&content)
    }

    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidStrategyCode`] for a bad strategy string.
    pub fn try_from_json_str(input: &str) -> std::result::Result<Self, ConfigError> {
        let it: Self = serde_json::from_str(input)?;
        it.suggestions.try_strategy_order()?;
        Ok(it)
    }
}

/// Things that go wrong running an internal command. They are shown to the user and the
/// shell keeps going.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum FmError {
    #[error("{path}: no such directory")]
    #[diagnostic(code(r3bl_fm::no_such_dir))]
    NoSuchDir { path: String },

    #[error("{eln}: no such entry list number")]
    #[diagnostic(code(r3bl_fm::no_such_eln))]
    NoSuchEln { eln: String },

    #[error("{query}: no parent directory matches")]
    #[diagnostic(code(r3bl_fm::no_back_dir))]
    NoBackDir { query: String },

    #[error("{terms}: no directory in the jump database matches")]
    #[diagnostic(code(r3bl_fm::no_jump_match))]
    NoJumpMatch { terms: String },

    #[error("{name}: no such file")]
    #[diagnostic(code(r3bl_fm::no_such_file))]
    NoSuchFile { name: String },

    #[error("Could not run {command:?}")]
    #[diagnostic(code(r3bl_fm::command))]
    Command {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
