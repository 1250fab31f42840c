//! CLI command handlers
//!
//! Handlers return the process exit code.

pub mod analyze;
pub mod config;
