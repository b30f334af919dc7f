// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fakes for the traits the engine talks to, shared by the unit tests, the integration
//! tests, and the `fm` crate's tests.

// Attach.
pub mod prompt_host_mock;
pub mod stdout_mock;
pub mod terminal_mock;
pub mod test_line;

// Re-export.
pub use prompt_host_mock::*;
pub use stdout_mock::*;
pub use terminal_mock::*;
pub use test_line::*;
