// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod history;
pub mod internal_commands;
pub mod jump_db;
pub mod line_editor;
pub mod session;
pub mod tables_builder;

// Re-export.
pub use history::*;
pub use internal_commands::*;
pub use jump_db::*;
pub use line_editor::*;
pub use session::*;
pub use tables_builder::*;
