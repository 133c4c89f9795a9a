//! tunedeck - a command-line music player.
//!
//! Searches a remote catalog, resolves playback sources (cached local
//! files take precedence over remote streams), invokes an external media
//! player, and maintains a small favorites cache plus a play-history log.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod player;
pub mod resolver;
pub mod store;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("tunedeck=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
