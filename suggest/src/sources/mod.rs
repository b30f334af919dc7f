// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod aliases;
pub mod bookmarks;
pub mod commands;
pub mod completions;
pub mod eln;
pub mod file_type_color;
pub mod filenames;
pub mod history;
pub mod jump;
pub mod match_types;
pub mod params;
pub mod source_api;
pub mod tables;
pub mod variables;

// Re-export.
pub use aliases::*;
pub use bookmarks::*;
pub use commands::*;
pub use completions::*;
pub use eln::*;
pub use file_type_color::*;
pub use filenames::*;
pub use history::*;
pub use jump::*;
pub use match_types::*;
pub use params::*;
pub use source_api::*;
pub use tables::*;
pub use variables::*;
