//! Command-line interface for tunedeck.
//!
//! This module provides the CLI commands for searching the catalog,
//! playing tracks, managing the favorites cache, and showing play
//! history.

mod commands;

pub use commands::{Cli, Commands, run_command};
