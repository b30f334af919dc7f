// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words autocd bookmarked sgr

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

//! # Inline autosuggestions for interactive shells
//!
//! This crate draws a dimmed "ghost" completion right after the cursor while the user
//! types a command line, the way fish or zsh-autosuggestions do, and it is tuned for a
//! file manager shell: directory entries can be referred to by their entry list number
//! (ELN), directories can be visited just by typing their name (autocd), and a ranked
//! jump database remembers where the user has been.
//!
//! On every keystroke the [`SuggestionEngine`]:
//!
//! 1. Re-reads the line buffer through the [`LineBuffer`] trait and splits it into
//!    words with [`segment()`] (quotes, backslash escapes and `;` / `|` / `&&`
//!    pipelines are understood).
//! 2. Asks the [`SuggestionSource`]s, in the order given by the [`StrategyOrder`]
//!    string (eg: `"ehfjbac"`), for a [`MatchResult`]. The first partial or full match
//!    wins.
//! 3. Hands a partial match to the renderer, which writes the unfinished suffix in
//!    color, deals with line wrapping and viewport scrolling, and puts the cursor back
//!    exactly where it was. A full match, or no match, clears whatever was drawn
//!    before.
//! 4. Swaps the prompt for a warning prompt when the first word is not a known
//!    command, and swaps it back once the word is fixed.
//!
//! All terminal I/O goes through [`TerminalOps`], so the whole pipeline can be driven
//! against [`test_fixtures::TerminalMock`], which simulates a screen grid.
//!
//! ```no_run
//! use r3bl_suggest::{CrosstermTerminal, EngineIo, SuggestionConfig, SuggestionEngine,
//!                    SuggestionTables, test_fixtures::{PromptHostMock, TestLine}};
//!
//! let mut engine = SuggestionEngine::new(SuggestionConfig::default());
//! let tables = SuggestionTables::default();
//! let mut term = CrosstermTerminal::new(std::io::stdout());
//! let mut prompt_host = PromptHostMock::new("$ ");
//! let line = TestLine::at_end("gi");
//! let mut io = EngineIo::new(&mut term, &mut prompt_host);
//! let _outcome = engine.on_input('i', &line, &tables, &mut io);
//! ```

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod config;
pub mod core;
pub mod line;
pub mod prompt;
pub mod render;
pub mod sources;
pub mod strategy;
pub mod test_fixtures;

// Re-export.
pub use config::*;
pub use core::*;
pub use line::*;
pub use prompt::*;
pub use render::*;
pub use sources::*;
pub use strategy::*;
