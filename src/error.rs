//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors (e.g., [`CatalogError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use tunedeck::error::{Error, Result};
//!
//! fn resolve(query: &str) -> Result<()> {
//!     let pool = init_db()?;   // Store errors auto-convert
//!     let file = check(path)?; // IO errors auto-convert
//!     Ok(())
//! }
//! ```

use crate::catalog::CatalogError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Favorites store unavailable (persistence I/O failure)
    #[error("Store unavailable: {0}")]
    Store(#[from] sqlx::Error),

    /// No search results / no cached entry for a query
    #[error("Track not found: {0}")]
    NotFound(String),

    /// Remote stream extraction failed
    #[error("No playable source for {0}")]
    SourceUnavailable(String),

    /// External player exited abnormally or could not start
    #[error("Playback error: {0}")]
    Playback(String),

    /// Catalog client error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a not found error.
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound(query.into())
    }

    /// Create a source unavailable error.
    pub fn source_unavailable(id: impl Into<String>) -> Self {
        Self::SourceUnavailable(id.into())
    }

    /// Create a playback error.
    pub fn playback(message: impl Into<String>) -> Self {
        Self::Playback(message.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this is an expected "nothing to play" outcome rather than
    /// a fault. These render as a plain message, never a backtrace.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::SourceUnavailable(_))
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Store(e).context(ctx))
    }
}
