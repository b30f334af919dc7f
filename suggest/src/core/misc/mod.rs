// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod calc_str_len;
pub mod shell_escape;

// Re-export.
pub use calc_str_len::*;
pub use shell_escape::*;
