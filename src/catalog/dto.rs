//! Invidious API Data Transfer Objects
//!
//! These types match EXACTLY what the Invidious API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the catalog module - convert to domain types.
//!
//! API Reference: https://docs.invidious.io/api/
//!
//! We use two endpoints: `/api/v1/search` for free-text search and
//! `/api/v1/videos/{id}` for metadata plus the audio format list.

use serde::{Deserialize, Serialize};

/// One item from a `/api/v1/search?type=video` response.
///
/// The search endpoint returns a heterogeneous array; non-video items
/// (channels, playlists) carry a different `type` and are filtered out
/// by the adapter.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    /// Item kind ("video", "channel", "playlist")
    #[serde(rename = "type")]
    pub item_type: String,
    /// Video identifier
    pub video_id: Option<String>,
    /// Video title
    pub title: Option<String>,
    /// Channel / artist name
    pub author: Option<String>,
    /// Length in seconds
    #[serde(default)]
    pub length_seconds: Option<u64>,
}

/// Response from `/api/v1/videos/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    /// Video identifier
    pub video_id: String,
    /// Video title
    pub title: String,
    /// Channel / artist name
    pub author: String,
    /// Length in seconds
    #[serde(default)]
    pub length_seconds: Option<u64>,
    /// Audio/video-only formats (the audio ones are what we want)
    #[serde(default)]
    pub adaptive_formats: Vec<AdaptiveFormat>,
}

/// One entry of `adaptiveFormats`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveFormat {
    /// Direct media URL
    pub url: String,
    /// MIME type with codec info, e.g. `audio/mp4; codecs="mp4a.40.2"`
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Bitrate as a decimal string (the API sends it quoted)
    pub bitrate: Option<String>,
    /// Format tag
    pub itag: Option<String>,
}

/// Error response from the Invidious API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
