//! Playback invocation via an external media player.
//!
//! This module shells out to a media player binary (mpv or VLC) rather
//! than decoding audio in-process. The player is handed a resolved source
//! (local path or remote URL) and the command blocks until it exits or
//! the user interrupts with Ctrl+C, in which case the child is killed and
//! control returns cleanly. Playback never touches the favorites store.
//!
//! Install a player:
//! - Windows: `winget install VideoLAN.VLC` or `winget install mpv`
//! - macOS:   `brew install mpv`
//! - Linux:   `apt install mpv` or equivalent

use std::process::Command;

use tokio::process::Command as AsyncCommand;
use tracing::{info, warn};

use crate::config::PlayerConfig;
use crate::error::{Error, Result};
use crate::resolver::PlaybackSource;

/// Common installation paths for players on Windows
#[cfg(windows)]
const PLAYER_CANDIDATES: &[&str] = &[
    "mpv", // In PATH
    "vlc",
    r"C:\Program Files\VideoLAN\VLC\vlc.exe",
    r"C:\Program Files (x86)\VideoLAN\VLC\vlc.exe",
];

#[cfg(not(windows))]
const PLAYER_CANDIDATES: &[&str] = &[
    "mpv", // In PATH
    "/usr/bin/mpv",
    "/usr/local/bin/mpv",
    "/opt/homebrew/bin/mpv",
    "cvlc",
    "/usr/bin/cvlc",
];

/// How a playback attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The player exited normally after the track ended
    Completed,
    /// The user interrupted playback with Ctrl+C
    Interrupted,
}

/// Find a usable player binary.
///
/// A configured command is probed first; when none is configured, common
/// candidates are tried in order.
fn find_player(configured: Option<&str>) -> Option<String> {
    match configured {
        Some(cmd) => probe(cmd).then(|| cmd.to_string()),
        None => PLAYER_CANDIDATES
            .iter()
            .find(|&&cmd| probe(cmd))
            .map(|&cmd| cmd.to_string()),
    }
}

/// Check whether a binary runs at all.
fn probe(command: &str) -> bool {
    Command::new(command)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check if any supported player is available on the system
pub fn is_player_available(config: &PlayerConfig) -> bool {
    find_player(config.command.as_deref()).is_some()
}

/// Audio-only, non-interactive argument set for a known player.
fn default_args(player: &str) -> Vec<String> {
    if player.contains("vlc") {
        vec![
            "--intf".to_string(),
            "dummy".to_string(),
            "--play-and-exit".to_string(),
        ]
    } else {
        // mpv and mpv-compatible players
        vec!["--no-video".to_string(), "--really-quiet".to_string()]
    }
}

/// Play a resolved source, blocking until the player exits.
///
/// Ctrl+C during playback kills the player process and returns
/// [`PlaybackOutcome::Interrupted`] rather than an error.
///
/// # Errors
///
/// Returns [`Error::Playback`] when no player can be found, the player
/// fails to start, or it exits abnormally.
pub async fn play(config: &PlayerConfig, source: &PlaybackSource) -> Result<PlaybackOutcome> {
    let player = find_player(config.command.as_deref()).ok_or_else(|| {
        Error::playback(
            "no media player found. Install mpv (or VLC), or set player.command in the config",
        )
    })?;

    let args = if config.args.is_empty() {
        default_args(&player)
    } else {
        config.args.clone()
    };

    info!(target: "player", player = %player, source = %source.as_arg(), "Starting playback");

    let mut child = AsyncCommand::new(&player)
        .args(&args)
        .arg(source.as_arg())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::playback(format!("failed to start {player}: {e}")))?;

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|e| Error::playback(format!("failed to wait for {player}: {e}")))?;
            if status.success() {
                Ok(PlaybackOutcome::Completed)
            } else {
                Err(Error::playback(format!("{player} exited with {status}")))
            }
        }
        _ = tokio::signal::ctrl_c() => {
            if let Err(e) = child.kill().await {
                warn!(target: "player", error = %e, "Failed to kill player process");
            }
            info!(target: "player", "Playback interrupted");
            Ok(PlaybackOutcome::Interrupted)
        }
    }
}
