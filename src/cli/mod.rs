//! Command-Line Interface
//!
//! Command handlers and console output helpers. Argument parsing lives
//! in `main.rs`; each handler receives an explicit options struct plus
//! the loaded configuration.

pub mod commands;
pub mod util;
