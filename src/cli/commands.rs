//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed
//! arguments and returns a `Result`. `run_command` owns the tokio
//! runtime, builds the configuration/context once, and renders errors at
//! the boundary: expected "nothing to play" outcomes become plain
//! messages, everything else propagates with context.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use sqlx::SqlitePool;
use tokio::runtime::Runtime;
use tracing::warn;

use crate::catalog::CatalogClient;
use crate::config::{self, Config, Paths};
use crate::error::{Error, Result, ResultExt};
use crate::{history, player, resolver, store};

/// tunedeck CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory override (favorites DB, downloads, history)
    #[arg(long, global = true, env = "TUNEDECK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog for a track
    Search {
        /// Free-text query
        query: String,
    },
    /// Resolve a track (cached file or remote stream) and play it
    Play {
        /// Track identifier or free-text query
        query: String,
    },
    /// Download a track and register it as an offline favorite
    AddFavorite {
        /// Track identifier
        id: String,
    },
    /// List all favorites, marking entries whose file is missing
    ListFavorites,
    /// Delete a favorite and (best-effort) its cached file
    DeleteFavorite {
        /// Track identifier
        id: String,
    },
    /// Show the play history
    ShowHistory,
    /// Clear the play history
    ClearHistory,
    /// Show the configuration, or persist changes to it
    Config {
        /// Set the catalog API base URL
        #[arg(long)]
        api_base: Option<String>,

        /// Set the player command (empty string clears it)
        #[arg(long)]
        player: Option<String>,
    },
}

/// Run the parsed CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let mut config = config::load();
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }

    let paths = Paths::from_config(&config).map_err(|e| Error::config(e.to_string()))?;
    paths.ensure_dirs()?;

    let rt = Runtime::new()?;

    let result = match &cli.command {
        Commands::Search { query } => cmd_search(&rt, &config, query),
        Commands::Play { query } => cmd_play(&rt, &config, &paths, query),
        Commands::AddFavorite { id } => cmd_add_favorite(&rt, &config, &paths, id),
        Commands::ListFavorites => cmd_list_favorites(&rt, &paths),
        Commands::DeleteFavorite { id } => cmd_delete_favorite(&rt, &paths, id),
        Commands::ShowHistory => cmd_show_history(&paths),
        Commands::ClearHistory => cmd_clear_history(&paths),
        Commands::Config { api_base, player } => cmd_config(api_base.as_deref(), player.as_deref()),
    };

    match result {
        Ok(()) => Ok(()),
        // Expected misses render as a plain message, not a failure dump
        Err(e) if e.is_user_facing() => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Individual command implementations
// ============================================================================

fn cmd_search(rt: &Runtime, config: &Config, query: &str) -> Result<()> {
    rt.block_on(async {
        let catalog = CatalogClient::from_config(config);

        println!("Searching for: {query}");
        let tracks = catalog.search(query).await?;

        if tracks.is_empty() {
            println!("No results found.");
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec!["No.", "Title", "Artists", "Album", "Duration", "ID"]);
        for (i, track) in tracks.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&track.title),
                Cell::new(&track.artists),
                Cell::new(&track.album),
                Cell::new(&track.duration),
                Cell::new(&track.id),
            ]);
        }
        println!("{table}");
        Ok(())
    })
}

fn cmd_play(rt: &Runtime, config: &Config, paths: &Paths, query: &str) -> Result<()> {
    rt.block_on(async {
        let pool = open_store(paths).await?;
        let catalog = CatalogClient::from_config(config);

        let resolution = resolver::resolve(&pool, &catalog, query).await?;

        println!("Found: {} by {}", resolution.title, resolution.artists);
        if resolution.offline {
            println!("Playing from cache (offline).");
        }

        // Display-only log; a failure here never blocks playback
        if let Err(e) = history::append(&paths.history_file, &resolution.title, &resolution.track_id)
        {
            warn!(target: "history", error = %e, "Failed to append play history");
        }

        println!("Now playing: {} (Ctrl+C to stop)", resolution.title);
        match player::play(&config.player, &resolution.source).await? {
            player::PlaybackOutcome::Completed => {}
            player::PlaybackOutcome::Interrupted => println!("Playback stopped."),
        }
        Ok(())
    })
}

fn cmd_add_favorite(rt: &Runtime, config: &Config, paths: &Paths, id: &str) -> Result<()> {
    rt.block_on(async {
        let pool = open_store(paths).await?;
        let catalog = CatalogClient::from_config(config);

        println!("Downloading {id}...");
        let entry = store::register_favorite(&pool, &catalog, id, &paths.downloads_dir).await?;
        println!("Added favorite: {} -> {}", entry.title, entry.path);
        Ok(())
    })
}

fn cmd_list_favorites(rt: &Runtime, paths: &Paths) -> Result<()> {
    rt.block_on(async {
        let pool = open_store(paths).await?;
        let favorites = store::list_favorites(&pool).await?;

        if favorites.is_empty() {
            println!("No favorites yet. Use add-favorite <id> to cache one.");
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec!["ID", "Title", "Artist", "Path", "File"]);
        for entry in &favorites {
            let file_status = if entry.file_exists() { "ok" } else { "missing" };
            table.add_row(vec![
                Cell::new(&entry.track_id),
                Cell::new(&entry.title),
                Cell::new(&entry.artist),
                Cell::new(&entry.path),
                Cell::new(file_status),
            ]);
        }
        println!("{table}");
        Ok(())
    })
}

fn cmd_delete_favorite(rt: &Runtime, paths: &Paths, id: &str) -> Result<()> {
    rt.block_on(async {
        let pool = open_store(paths).await?;

        let entry = store::get_favorite_by_id(&pool, id).await?;
        let removed = store::delete_favorite(&pool, id).await?;

        if !removed {
            println!("No favorite with id {id}.");
            return Ok(());
        }
        println!("Removed favorite {id}.");

        // File removal is advisory; the metadata row is gone either way
        if let Some(entry) = entry {
            match std::fs::remove_file(&entry.path) {
                Ok(()) => println!("Deleted cached file {}.", entry.path),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(target: "store", path = %entry.path, error = %e, "Failed to delete cached file");
                    println!("Warning: could not delete cached file {}: {e}", entry.path);
                }
            }
        }
        Ok(())
    })
}

fn cmd_show_history(paths: &Paths) -> Result<()> {
    match history::read_all(&paths.history_file)? {
        Some(contents) => print!("{contents}"),
        None => println!("No history found."),
    }
    Ok(())
}

fn cmd_clear_history(paths: &Paths) -> Result<()> {
    history::clear(&paths.history_file)?;
    println!("History cleared.");
    Ok(())
}

fn cmd_config(api_base: Option<&str>, player: Option<&str>) -> Result<()> {
    // Re-read from disk so transient CLI overrides are never persisted
    let mut config = config::load();
    let mut changed = false;

    if let Some(base) = api_base {
        config.catalog.api_base = base.to_string();
        changed = true;
    }
    if let Some(cmd) = player {
        config.player.command = (!cmd.is_empty()).then(|| cmd.to_string());
        changed = true;
    }

    if changed {
        config::save(&config).map_err(|e| Error::config(e.to_string()))?;
        println!("Configuration saved.");
        return Ok(());
    }

    if let Some(path) = config::config_path() {
        println!("Config file: {}", path.display());
    }
    println!("Catalog API base: {}", config.catalog.api_base);
    println!(
        "Player command:   {} [{}]",
        config.player.command.as_deref().unwrap_or("(auto-detect)"),
        if player::is_player_available(&config.player) {
            "available"
        } else {
            "not found"
        }
    );
    println!(
        "Auth token:       {}",
        if config.credentials.auth_token.is_some() {
            "configured"
        } else {
            "none (guest mode)"
        }
    );
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

async fn open_store(paths: &Paths) -> Result<SqlitePool> {
    let url = store::db_url(Some(&paths.favorites_db));
    store::init_db(&url).await.with_context("opening favorites store")
}
