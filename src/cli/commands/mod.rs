//! CLI command handlers for `gpa-calc`.
//!
//! Each command is implemented in its own submodule.

pub mod calc;
pub mod catalog;
pub mod config;
pub mod shell;
