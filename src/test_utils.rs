//! Test utilities and fixtures for tunedeck tests.
//!
//! This module provides common test helpers and database utilities to
//! reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use tunedeck::test_utils::{temp_db, favorite_entry};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let entry = favorite_entry("abc123", "/cache/abc123.m4a");
//!     // ... test logic
//! }
//! ```

use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::model::FavoriteEntry;

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// # Returns
///
/// A tuple of (connection pool, temp directory handle).
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let pool = crate::store::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Creates a FavoriteEntry with sensible defaults.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let entry = FavoriteEntry {
///     title: "Custom".to_string(),
///     ..favorite_entry("abc123", "/cache/abc123.m4a")
/// };
/// ```
pub fn favorite_entry(track_id: &str, path: &str) -> FavoriteEntry {
    FavoriteEntry {
        track_id: track_id.to_string(),
        title: format!("Track {track_id}"),
        artist: "Test Artist".to_string(),
        path: path.to_string(),
    }
}

/// Inserts a favorite whose cached file actually exists under `dir`,
/// and returns the stored entry.
pub async fn cached_favorite(
    pool: &SqlitePool,
    dir: &std::path::Path,
    track_id: &str,
) -> FavoriteEntry {
    let file = dir.join(format!("{track_id}.m4a"));
    std::fs::write(&file, b"audio bytes").expect("Failed to write cached file");

    let entry = favorite_entry(track_id, &file.display().to_string());
    crate::store::upsert_favorite(pool, &entry)
        .await
        .expect("Failed to insert favorite");
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;

        // Should be able to query
        let favorites = crate::store::list_favorites(&pool).await.unwrap();
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn test_cached_favorite_file_exists() {
        let (pool, dir) = temp_db().await;

        let entry = cached_favorite(&pool, dir.path(), "abc123").await;
        assert!(entry.file_exists());

        let stored = crate::store::get_favorite_by_id(&pool, "abc123")
            .await
            .unwrap();
        assert_eq!(stored, Some(entry));
    }

    #[test]
    fn test_favorite_entry_defaults() {
        let entry = favorite_entry("abc123", "/cache/abc123.m4a");
        assert_eq!(entry.track_id, "abc123");
        assert_eq!(entry.title, "Track abc123");
        assert_eq!(entry.artist, "Test Artist");
    }
}
