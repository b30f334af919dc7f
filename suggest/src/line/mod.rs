// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod escape_sequence;
pub mod line_state;
pub mod word_segmenter;

// Re-export.
pub use escape_sequence::*;
pub use line_state::*;
pub use word_segmenter::*;
