// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod engine;
pub mod strategy_order;

// Re-export.
pub use engine::*;
pub use strategy_order::*;
