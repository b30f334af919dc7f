// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod colors;
pub mod suggestion_config;

// Re-export.
pub use colors::*;
pub use suggestion_config::*;
