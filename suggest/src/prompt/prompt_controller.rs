// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use crate::{SgrColor, SuggestionConfig};

/// First chars of words that are never flagged as unknown commands: comments, variable
/// assignments, quoted strings, and the `;` / `:` no-ops.
pub const WARNING_EXEMPT_CHARS: [char; 6] = [';', ':', '#', '$', '\'', '"'];

/// The line editor side of the prompt.
pub trait PromptHost: Debug {
    /// The prompt as currently shown, escape sequences included.
    fn prompt(&self) -> String;

    /// Install `prompt` and redraw the line with it.
    fn set_prompt(&mut self, prompt: &str);
}

/// Optional syntax highlighting of the line being typed.
pub trait SyntaxHighlighter: Debug {
    /// Redraw `line` with fresh colors.
    fn recolorize(&mut self, line: &str);

    /// The color the input is drawn in at the end of the line. Restored after a
    /// suggestion has been written.
    fn current_color(&self) -> Option<SgrColor>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptMode {
    #[default]
    Normal,
    /// The first word is not a known command.
    Warning,
}

/// Swaps the prompt for the warning prompt while the command name is invalid. Raising
/// and resolving are both idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    mode: PromptMode,
    saved_prompt: Option<String>,
}

impl PromptState {
    #[must_use]
    pub fn mode(&self) -> PromptMode { self.mode }

    #[must_use]
    pub fn is_warning(&self) -> bool { self.mode == PromptMode::Warning }

    /// Switch to the warning prompt because `word` is not a command. Returns whether
    /// the prompt changed.
    pub fn raise_warning(
        &mut self,
        word: &str,
        config: &SuggestionConfig,
        host: &mut dyn PromptHost,
    ) -> bool {
        if !config.warning_prompt_enabled
            || self.is_warning()
            || word.starts_with(WARNING_EXEMPT_CHARS)
        {
            return false;
        }

        self.saved_prompt = Some(host.prompt());
        host.set_prompt(&config.decorated_warning_prompt());
        self.mode = PromptMode::Warning;

        // % is Display, ? is Debug.
        tracing::debug!(message = "Unknown command, showing warning prompt", word = %word);
        true
    }

    /// Put the saved prompt back and recolor the line. Returns whether the prompt
    /// changed.
    pub fn resolve(
        &mut self,
        line: &str,
        host: &mut dyn PromptHost,
        highlighter: Option<&mut (dyn SyntaxHighlighter + '_)>,
    ) -> bool {
        if !self.is_warning() {
            return false;
        }

        if let Some(saved_prompt) = self.saved_prompt.take() {
            host.set_prompt(&saved_prompt);
        }
        self.mode = PromptMode::Normal;
        if let Some(highlighter) = highlighter {
            highlighter.recolorize(line);
        }

        tracing::debug!(message = "Warning prompt resolved");
        true
    }
}
