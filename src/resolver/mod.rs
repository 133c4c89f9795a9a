//! Audio source resolution: cached local file vs remote stream.
//!
//! Given a user-supplied query (a track identifier or free text), decide
//! where playback should read from. The cache check is two-phase:
//!
//! 1. the raw query is tried against the favorites store (by identifier,
//!    then by exact title) - a hit whose file still exists short-circuits
//!    before any network access
//! 2. otherwise the query goes to the catalog, and the first candidate's
//!    *resolved* identifier is checked against the store again - a free
//!    text query can resolve to an identifier that is already cached
//!
//! Only when both phases miss do we ask the catalog for a stream URL.
//! A favorites row whose file has been deleted out-of-band is treated as
//! a miss, never returned as a playback source.

use std::path::PathBuf;

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::catalog::{CatalogApi, CatalogError};
use crate::error::{Error, Result};
use crate::model::FavoriteEntry;
use crate::store;

/// Where the player should read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSource {
    /// Cached audio file
    Local(PathBuf),
    /// Remote stream URL
    Remote(String),
}

impl PlaybackSource {
    /// Render the source as a player argument.
    pub fn as_arg(&self) -> String {
        match self {
            Self::Local(path) => path.display().to_string(),
            Self::Remote(url) => url.clone(),
        }
    }
}

/// A resolved playback decision, with enough metadata for display and
/// history logging.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Playback source
    pub source: PlaybackSource,
    /// True when the source is a local file and no network was needed
    pub offline: bool,
    /// Resolved track identifier
    pub track_id: String,
    /// Track title
    pub title: String,
    /// Artist display string
    pub artists: String,
}

/// Resolve a query to a playback source.
///
/// # Errors
///
/// - [`Error::NotFound`] when the cache misses and the catalog has no
///   candidates
/// - [`Error::SourceUnavailable`] when a candidate exists but no stream
///   can be obtained
/// - [`Error::Store`] / [`Error::Catalog`] for infrastructure failures
pub async fn resolve(
    pool: &SqlitePool,
    catalog: &impl CatalogApi,
    query: &str,
) -> Result<Resolution> {
    // Phase 1: the raw query may name a cached favorite directly.
    if let Some(entry) = lookup_favorite(pool, query).await? {
        if entry.file_exists() {
            info!(target: "resolver", id = %entry.track_id, "Cache hit, playing offline");
            return Ok(offline_resolution(entry));
        }
        debug!(
            target: "resolver",
            id = %entry.track_id,
            path = %entry.path,
            "Cached file missing, falling through to catalog"
        );
    }

    // Phase 2: ask the catalog and take its first candidate.
    let candidates = catalog.search(query).await?;
    let Some(candidate) = candidates.into_iter().next() else {
        return Err(Error::not_found(query));
    };

    // The free-text query and the canonical identifier may differ; the
    // resolved identifier can still be cached.
    if let Some(entry) = store::get_favorite_by_id(pool, &candidate.id).await? {
        if entry.file_exists() {
            info!(target: "resolver", id = %entry.track_id, "Resolved identifier is cached, playing offline");
            return Ok(offline_resolution(entry));
        }
    }

    let url = match catalog.resolve_stream(&candidate.id).await {
        Ok(url) => url,
        Err(CatalogError::NoStream(id) | CatalogError::UnknownTrack(id)) => {
            return Err(Error::source_unavailable(id));
        }
        Err(e) => return Err(e.into()),
    };

    info!(target: "resolver", id = %candidate.id, "Resolved remote stream");
    Ok(Resolution {
        source: PlaybackSource::Remote(url),
        offline: false,
        track_id: candidate.id,
        title: candidate.title,
        artists: candidate.artists,
    })
}

/// Favorites lookup for the raw query: by identifier, then by exact title.
async fn lookup_favorite(pool: &SqlitePool, query: &str) -> Result<Option<FavoriteEntry>> {
    if let Some(entry) = store::get_favorite_by_id(pool, query).await? {
        return Ok(Some(entry));
    }
    Ok(store::get_favorite_by_title(pool, query).await?)
}

fn offline_resolution(entry: FavoriteEntry) -> Resolution {
    Resolution {
        source: PlaybackSource::Local(PathBuf::from(&entry.path)),
        offline: true,
        track_id: entry.track_id,
        title: entry.title,
        artists: entry.artist,
    }
}
