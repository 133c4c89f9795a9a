//! Track catalog client.
//!
//! Talks to an Invidious-compatible JSON API for three things: free-text
//! search, per-track metadata lookup, and audio stream URLs (either for
//! direct streaming or for downloading into the favorites cache).
//!
//! Module layout follows the usual client split:
//! - `dto` - types matching the API wire format exactly
//! - `adapter` - conversion from DTOs to our domain types
//! - `client` - HTTP client
//! - `traits` - the [`CatalogApi`] seam for dependency injection in tests

pub mod adapter;
pub mod client;
pub mod dto;
pub mod traits;

pub use client::CatalogClient;
pub use traits::CatalogApi;

/// Errors from the catalog client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("No such track: {0}")]
    UnknownTrack(String),

    #[error("No audio stream available for {0}")]
    NoStream(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Authentication rejected")]
    AuthRejected,
}
