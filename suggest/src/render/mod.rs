// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod crossterm_terminal;
pub mod render_state;
pub mod suggestion_renderer;
pub mod terminal_ops;

// Re-export.
pub use crossterm_terminal::*;
pub use render_state::*;
pub use suggestion_renderer::*;
pub use terminal_ops::*;
