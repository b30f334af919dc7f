// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words setuid setgid hardlink

use std::{collections::BTreeMap,
          fmt::{Display, Formatter, Result}};

use serde::{Deserialize, Serialize};

/// The parameters of an SGR (Select Graphic Rendition) escape sequence, eg: `"02;36"`
/// for dim cyan. Stored without the leading `ESC [` and trailing `m` so the value can
/// be written in config files the way `LS_COLORS` is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SgrColor(String);

impl SgrColor {
    pub fn new(params: impl Into<String>) -> Self { Self(params.into()) }

    #[must_use]
    pub fn params(&self) -> &str { &self.0 }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// The full escape sequence. An empty color resets all attributes.
    #[must_use]
    pub fn escape_sequence(&self) -> String {
        if self.0.is_empty() {
            "\x1b[0m".to_string()
        } else {
            format!("\x1b[{}m", self.0)
        }
    }
}

impl Display for SgrColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "{}", self.escape_sequence()) }
}

impl From<&str> for SgrColor {
    fn from(params: &str) -> Self { Self::new(params) }
}

/// Colors used to draw suggestions, one per kind of source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionColors {
    pub file: SgrColor,
    pub history: SgrColor,
    pub internal_command: SgrColor,
    pub external_command: SgrColor,
    pub builtin: SgrColor,
    pub alias: SgrColor,
    pub variable: SgrColor,
    /// The `>` marker drawn before alias expansions, bookmark paths and other
    /// suggestions that replace the typed word instead of extending it.
    pub pointer: SgrColor,
    pub warning_prompt: SgrColor,
    /// Input color while the warning prompt is up.
    pub warning_input: SgrColor,
}

impl Default for SuggestionColors {
    fn default() -> Self {
        Self {
            file: "02;04;36".into(),
            history: "02;37".into(),
            internal_command: "02;32".into(),
            external_command: "02;35".into(),
            builtin: "02;33".into(),
            alias: "02;32".into(),
            variable: "02;33".into(),
            pointer: "02;31".into(),
            warning_prompt: "00;02;31".into(),
            warning_input: "00;31".into(),
        }
    }
}

/// `LS_COLORS` style colors by file type, used when suggestions are colored by the type
/// of the file they name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTypeColors {
    pub dir: SgrColor,
    pub dir_unreadable: SgrColor,
    pub symlink: SgrColor,
    pub symlink_broken: SgrColor,
    pub exec: SgrColor,
    pub exec_empty: SgrColor,
    pub file: SgrColor,
    pub file_empty: SgrColor,
    pub setuid: SgrColor,
    pub setgid: SgrColor,
    pub multi_hardlink: SgrColor,
    pub socket: SgrColor,
    pub fifo: SgrColor,
    pub block_device: SgrColor,
    pub char_device: SgrColor,
    /// Keyed by extension without the dot, lowercase. Eg: `"rs"`.
    pub extensions: BTreeMap<String, SgrColor>,
}

impl Default for FileTypeColors {
    fn default() -> Self {
        Self {
            dir: "01;34".into(),
            dir_unreadable: "04;01;34".into(),
            symlink: "01;36".into(),
            symlink_broken: "02;04;36".into(),
            exec: "01;32".into(),
            exec_empty: "04;01;32".into(),
            file: SgrColor::default(),
            file_empty: "02;33".into(),
            setuid: "37;41".into(),
            setgid: "30;43".into(),
            multi_hardlink: "07".into(),
            socket: "01;35".into(),
            fifo: "33".into(),
            block_device: "01;33".into(),
            char_device: "01;33".into(),
            extensions: BTreeMap::new(),
        }
    }
}
