// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words autocd

//! # A tiny file manager shell with inline autosuggestions
//!
//! `fm` lists the current directory with entry list numbers (ELNs) and reads command
//! lines in raw mode. While the user types, [`r3bl_suggest::SuggestionEngine`] draws
//! the rest of the most likely completion right after the cursor, and pressing the
//! right arrow at the end of the line accepts it.
//!
//! Navigation:
//! - `cd <dir>`, or just the name of a directory (or its ELN) when autocd is on.
//! - `bd <query>` goes back to the closest parent directory containing `query`.
//! - `j <terms>`, `jc <terms>`, `jp <terms>`, `jo <n>` jump through the directories
//!   visited so far, best ranked first.
//! - `s <eln or name>...` selects files, `ds` clears the selection, `q` quits.
//!
//! Anything else is handed to `sh -c`.

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod clap_config;
pub mod fm_config;
pub mod shell;

// Re-export.
pub use clap_config::*;
pub use fm_config::*;
pub use shell::*;
