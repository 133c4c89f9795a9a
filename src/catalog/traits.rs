//! Trait definitions for the catalog boundary.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real [`CatalogClient`], while tests can
//! substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use tunedeck::catalog::CatalogApi;
//!
//! // In production code:
//! async fn process<T: CatalogApi>(catalog: &T, query: &str) {
//!     let tracks = catalog.search(query).await?;
//! }
//!
//! // In tests:
//! struct MockCatalog { ... }
//! impl CatalogApi for MockCatalog { ... }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{CatalogError, client::CatalogClient};
use crate::model::Track;

/// Trait for the track catalog boundary.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Free-text search returning candidates in the catalog's order.
    async fn search(&self, query: &str) -> Result<Vec<Track>, CatalogError>;

    /// Look up a single track by identifier.
    async fn lookup(&self, track_id: &str) -> Result<Track, CatalogError>;

    /// Resolve a streamable remote URL for a track.
    async fn resolve_stream(&self, track_id: &str) -> Result<String, CatalogError>;

    /// Download a track's audio into `dest_dir`, returning the final path.
    async fn download(&self, track_id: &str, dest_dir: &Path) -> Result<PathBuf, CatalogError>;
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn search(&self, query: &str) -> Result<Vec<Track>, CatalogError> {
        self.search(query).await
    }

    async fn lookup(&self, track_id: &str) -> Result<Track, CatalogError> {
        self.lookup(track_id).await
    }

    async fn resolve_stream(&self, track_id: &str) -> Result<String, CatalogError> {
        self.resolve_stream(track_id).await
    }

    async fn download(&self, track_id: &str, dest_dir: &Path) -> Result<PathBuf, CatalogError> {
        self.download(track_id, dest_dir).await
    }
}

/// Mock catalog for testing.
///
/// Returns configurable responses and counts every call, so tests can
/// assert that the offline fast path performs zero catalog calls.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::model::SINGLE_ALBUM;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock catalog that returns predefined results.
    pub struct MockCatalog {
        /// Search results to return
        pub tracks: Vec<Track>,
        /// Stream URL to return for any identifier
        pub stream_url: Option<String>,
        /// Error to return from every call (takes precedence)
        pub error: Option<CatalogError>,
        /// Total number of calls made against this mock
        calls: AtomicUsize,
    }

    impl MockCatalog {
        /// Create a mock that finds nothing.
        pub fn empty() -> Self {
            Self {
                tracks: vec![],
                stream_url: None,
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Create a mock with a single candidate and a stream URL for it.
        pub fn single_track(id: &str, title: &str, stream_url: &str) -> Self {
            Self {
                tracks: vec![mock_track(id, title)],
                stream_url: Some(stream_url.to_string()),
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Create a mock with a candidate but no obtainable stream.
        pub fn single_track_no_stream(id: &str, title: &str) -> Self {
            Self {
                tracks: vec![mock_track(id, title)],
                stream_url: None,
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Create a mock that returns an error from every call.
        pub fn with_error(error: CatalogError) -> Self {
            Self {
                tracks: vec![],
                stream_url: None,
                error: Some(error),
                calls: AtomicUsize::new(0),
            }
        }

        /// Number of catalog calls observed.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record_call(&self) -> Result<(), CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.error {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    /// Build a plain test track.
    pub fn mock_track(id: &str, title: &str) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artists: "Test Artist".to_string(),
            album: SINGLE_ALBUM.to_string(),
            duration: "3:00".to_string(),
        }
    }

    #[async_trait]
    impl CatalogApi for MockCatalog {
        async fn search(&self, _query: &str) -> Result<Vec<Track>, CatalogError> {
            self.record_call()?;
            Ok(self.tracks.clone())
        }

        async fn lookup(&self, track_id: &str) -> Result<Track, CatalogError> {
            self.record_call()?;
            self.tracks
                .iter()
                .find(|t| t.id == track_id)
                .cloned()
                .ok_or_else(|| CatalogError::UnknownTrack(track_id.to_string()))
        }

        async fn resolve_stream(&self, track_id: &str) -> Result<String, CatalogError> {
            self.record_call()?;
            self.stream_url
                .clone()
                .ok_or_else(|| CatalogError::NoStream(track_id.to_string()))
        }

        async fn download(&self, track_id: &str, dest_dir: &Path) -> Result<PathBuf, CatalogError> {
            self.record_call()?;
            if self.stream_url.is_none() {
                return Err(CatalogError::NoStream(track_id.to_string()));
            }
            let dest = dest_dir.join(format!("{track_id}.m4a"));
            std::fs::write(&dest, b"mock audio").map_err(|e| CatalogError::Download(e.to_string()))?;
            Ok(dest)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_counts_calls() {
            let mock = MockCatalog::single_track("abc123", "Song", "https://example/abc123");
            assert_eq!(mock.call_count(), 0);

            let _ = mock.search("song").await.unwrap();
            let _ = mock.resolve_stream("abc123").await.unwrap();
            assert_eq!(mock.call_count(), 2);
        }

        #[tokio::test]
        async fn test_mock_empty_search() {
            let mock = MockCatalog::empty();
            let results = mock.search("anything").await.unwrap();
            assert!(results.is_empty());
        }

        #[tokio::test]
        async fn test_mock_lookup_unknown() {
            let mock = MockCatalog::empty();
            let result = mock.lookup("missing").await;
            assert!(matches!(result, Err(CatalogError::UnknownTrack(_))));
        }

        #[tokio::test]
        async fn test_mock_error_propagates() {
            let mock = MockCatalog::with_error(CatalogError::RateLimited);
            let result = mock.search("anything").await;
            assert!(matches!(result, Err(CatalogError::RateLimited)));
        }
    }
}
