//! Invidious HTTP client
//!
//! Handles communication with an Invidious-compatible web service.
//! See: https://docs.invidious.io/api/
//!
//! ## Authentication
//!
//! Requests carry a bearer token when one is configured. If an
//! authenticated request comes back 401/403, we retry exactly once
//! without credentials (guest mode) before surfacing the failure - many
//! instances serve search and video metadata fine to guests, so a stale
//! token should not take the whole command down.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use super::{CatalogError, adapter, dto};
use crate::model::Track;

/// Catalog API client
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl CatalogClient {
    /// Create a new client for the given API base URL.
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses (reduces bandwidth)
    /// - Send User-Agent header identifying the application
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true) // Accept gzip-compressed responses
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: trim_trailing_slash(base_url.into()),
            auth_token,
        }
    }

    /// Create a client from application config.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            config.catalog.api_base.clone(),
            config.credentials.auth_token.clone(),
        )
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(base_url, None)
    }

    /// Search the catalog, returning candidates in the catalog's own order.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>, CatalogError> {
        let url = format!(
            "{}/api/v1/search?q={}&type=video",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self.get_with_auth_fallback(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_status(status, response).await);
        }

        let items = response
            .json::<Vec<dto::SearchItem>>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(adapter::to_tracks(items))
    }

    /// Look up track metadata by identifier.
    pub async fn lookup(&self, track_id: &str) -> Result<Track, CatalogError> {
        let video = self.fetch_video(track_id).await?;
        Ok(adapter::to_track(&video))
    }

    /// Resolve a streamable URL for a track: the highest-bitrate audio
    /// format the catalog offers.
    pub async fn resolve_stream(&self, track_id: &str) -> Result<String, CatalogError> {
        let video = self.fetch_video(track_id).await?;
        let format = adapter::best_audio_format(&video.adaptive_formats)
            .ok_or_else(|| CatalogError::NoStream(track_id.to_string()))?;
        Ok(format.url.clone())
    }

    /// Download a track's audio into `dest_dir`.
    ///
    /// The destination is deterministic per identifier:
    /// `dest_dir/<track_id>.<ext>` with the extension derived from the
    /// chosen audio format. Bytes stream into a `.part` file that is
    /// renamed into place only on success, so a failed download never
    /// leaves a usable-looking file at the final path.
    pub async fn download(&self, track_id: &str, dest_dir: &Path) -> Result<PathBuf, CatalogError> {
        let video = self.fetch_video(track_id).await?;
        let format = adapter::best_audio_format(&video.adaptive_formats)
            .ok_or_else(|| CatalogError::NoStream(track_id.to_string()))?;

        let dest = dest_dir.join(format!("{}.{}", track_id, adapter::extension_for(format)));
        let part = dest.with_extension("part");

        tracing::info!(target: "catalog::download", id = track_id, dest = %dest.display(), "Downloading audio");

        let result = self.stream_to_file(&format.url, &part).await;
        if let Err(e) = result {
            // Leave no partial file behind
            let _ = tokio::fs::remove_file(&part).await;
            return Err(e);
        }

        tokio::fs::rename(&part, &dest)
            .await
            .map_err(|e| CatalogError::Download(format!("rename failed: {e}")))?;

        Ok(dest)
    }

    /// Fetch and parse a single video response.
    async fn fetch_video(&self, track_id: &str) -> Result<dto::VideoResponse, CatalogError> {
        let url = format!("{}/api/v1/videos/{}", self.base_url, track_id);

        let response = self.get_with_auth_fallback(&url).await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::UnknownTrack(track_id.to_string()));
        }
        if !status.is_success() {
            return Err(error_from_status(status, response).await);
        }

        response
            .json::<dto::VideoResponse>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// GET with the configured token, retrying once without credentials
    /// if the server rejects them.
    async fn get_with_auth_fallback(&self, url: &str) -> Result<reqwest::Response, CatalogError> {
        let response = self.send(url, self.auth_token.as_deref()).await?;

        if self.auth_token.is_some() && is_auth_rejection(response.status()) {
            tracing::warn!(
                target: "catalog::client",
                status = %response.status(),
                "Authenticated request rejected, retrying as guest"
            );
            let retry = self.send(url, None).await?;
            if is_auth_rejection(retry.status()) {
                return Err(CatalogError::AuthRejected);
            }
            return Ok(retry);
        }

        if is_auth_rejection(response.status()) {
            return Err(CatalogError::AuthRejected);
        }

        Ok(response)
    }

    async fn send(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<reqwest::Response, CatalogError> {
        let mut request = self.http_client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))
    }

    /// Stream a response body to a file.
    async fn stream_to_file(&self, url: &str, path: &Path) -> Result<(), CatalogError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::Download(format!(
                "HTTP {} fetching media",
                response.status()
            )));
        }

        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| CatalogError::Download(e.to_string()))?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| CatalogError::Network(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| CatalogError::Download(e.to_string()))?;
        }

        file.flush()
            .await
            .map_err(|e| CatalogError::Download(e.to_string()))?;
        Ok(())
    }
}

fn is_auth_rejection(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
}

/// Map a non-success status to a catalog error, consuming the response
/// body for detail where the API provides one.
async fn error_from_status(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> CatalogError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return CatalogError::RateLimited;
    }

    // Try to parse the API's error envelope
    if let Ok(error) = response.json::<dto::ApiError>().await {
        return CatalogError::Api(error.error);
    }

    CatalogError::Network(format!(
        "HTTP {}: {}",
        status,
        status.canonical_reason().unwrap_or("Unknown")
    ))
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
