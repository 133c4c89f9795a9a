//! Core data models.
//!
//! Defines the two record types the application moves around: [`Track`]
//! (transient, produced by the catalog client) and [`FavoriteEntry`]
//! (persistent, mapped to the `favorites` table via SQLx).

use sqlx::FromRow;

/// Album name used when the catalog reports no album for a track.
pub const SINGLE_ALBUM: &str = "Single";

/// A candidate track returned by the catalog client.
///
/// All fields are display-oriented: `duration` is a pre-rendered string
/// (e.g. "3:54") and no arithmetic is ever performed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Opaque catalog identifier, stable per remote track
    pub id: String,
    /// Track title
    pub title: String,
    /// Comma-joined artist display string
    pub artists: String,
    /// Album name, or [`SINGLE_ALBUM`] when the catalog has none
    pub album: String,
    /// Duration display string ("m:ss")
    pub duration: String,
}

/// A persisted favorite: a track identifier bound to a locally cached
/// audio file.
///
/// The path is *expected* to exist, but the file can be deleted
/// out-of-band at any time. Anything trusting a cache hit must check the
/// filesystem first.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FavoriteEntry {
    /// Catalog track identifier (primary key)
    pub track_id: String,
    /// Track title
    pub title: String,
    /// Artist display string
    pub artist: String,
    /// Path of the cached audio file
    pub path: String,
}

impl FavoriteEntry {
    /// Whether the cached file still exists on disk.
    pub fn file_exists(&self) -> bool {
        std::path::Path::new(&self.path).exists()
    }
}
