//! Favorites store: persistent mapping of track identifier to cached file.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! The store exclusively owns the `favorites` table; playback and search
//! never write to it. A single local CLI process is assumed, so no locking
//! discipline is needed beyond SQLite's own statement atomicity.
//!
//! # Example
//!
//! ```ignore
//! use tunedeck::store::{init_db, list_favorites};
//!
//! let pool = init_db("sqlite:favorites.db").await?;
//! let favorites = list_favorites(&pool).await?;
//! ```

use std::path::Path;

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::catalog::CatalogApi;
use crate::model::FavoriteEntry;

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "favorites.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool, and runs all pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Insert or replace a favorite.
///
/// Uses SQLite's UPSERT keyed on `track_id`: a single statement, so the
/// write is all-or-nothing and calling twice with the same identifier
/// leaves exactly one row reflecting the latest write.
pub async fn upsert_favorite(pool: &SqlitePool, entry: &FavoriteEntry) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO favorites (track_id, title, artist, path)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(track_id) DO UPDATE SET
            title = excluded.title,
            artist = excluded.artist,
            path = excluded.path
        "#,
    )
    .bind(&entry.track_id)
    .bind(&entry.title)
    .bind(&entry.artist)
    .bind(&entry.path)
    .execute(pool)
    .await?;
    Ok(())
}

/// Point lookup by track identifier.
pub async fn get_favorite_by_id(
    pool: &SqlitePool,
    track_id: &str,
) -> sqlx::Result<Option<FavoriteEntry>> {
    sqlx::query_as::<_, FavoriteEntry>(
        "SELECT track_id, title, artist, path FROM favorites WHERE track_id = ?",
    )
    .bind(track_id)
    .fetch_optional(pool)
    .await
}

/// Point lookup by exact title.
///
/// When several favorites share a title the first row wins; no ordering
/// is defined.
pub async fn get_favorite_by_title(
    pool: &SqlitePool,
    title: &str,
) -> sqlx::Result<Option<FavoriteEntry>> {
    sqlx::query_as::<_, FavoriteEntry>(
        "SELECT track_id, title, artist, path FROM favorites WHERE title = ? LIMIT 1",
    )
    .bind(title)
    .fetch_optional(pool)
    .await
}

/// Delete a favorite's metadata row.
///
/// Returns `true` if a row was removed, `false` if the identifier was
/// absent (a no-op, not an error). The caller is responsible for removing
/// the backing file; that step is advisory while this one is
/// authoritative.
pub async fn delete_favorite(pool: &SqlitePool, track_id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM favorites WHERE track_id = ?")
        .bind(track_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Download a track into `dest_dir` and register it as a favorite.
///
/// The row is only written after the download has fully materialized on
/// disk, so a failed or interrupted download leaves the table untouched.
pub async fn register_favorite(
    pool: &SqlitePool,
    catalog: &impl CatalogApi,
    track_id: &str,
    dest_dir: &Path,
) -> crate::error::Result<FavoriteEntry> {
    let track = catalog.lookup(track_id).await?;
    let dest = catalog.download(track_id, dest_dir).await?;

    let entry = FavoriteEntry {
        track_id: track.id,
        title: track.title,
        artist: track.artists,
        path: dest.display().to_string(),
    };
    upsert_favorite(pool, &entry).await?;
    Ok(entry)
}

/// Get all favorites. Order not guaranteed.
pub async fn list_favorites(pool: &SqlitePool) -> sqlx::Result<Vec<FavoriteEntry>> {
    sqlx::query_as::<_, FavoriteEntry>("SELECT track_id, title, artist, path FROM favorites")
        .fetch_all(pool)
        .await
}
