// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{PromptHost, SgrColor, SyntaxHighlighter};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptHostMock {
    pub prompt: String,
    /// Every prompt installed with [`PromptHost::set_prompt`], in order.
    pub set_prompt_calls: Vec<String>,
}

impl PromptHostMock {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            set_prompt_calls: Vec::new(),
        }
    }
}

impl PromptHost for PromptHostMock {
    fn prompt(&self) -> String { self.prompt.clone() }

    fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.set_prompt_calls.push(prompt.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlighterMock {
    /// Lines passed to [`SyntaxHighlighter::recolorize`], in order.
    pub recolorized: Vec<String>,
    pub color: Option<SgrColor>,
}

impl SyntaxHighlighter for HighlighterMock {
    fn recolorize(&mut self, line: &str) { self.recolorized.push(line.to_string()); }

    fn current_color(&self) -> Option<SgrColor> { self.color.clone() }
}
