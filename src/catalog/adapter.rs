//! Adapter layer: Convert Invidious DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if the API changes its response format,
//! only this file and dto.rs need to change.

use super::dto;
use crate::model::{SINGLE_ALBUM, Track};

/// Convert a search response into candidate tracks, preserving the
/// catalog's own ordering.
///
/// Non-video items (channels, playlists) and malformed entries are
/// dropped.
pub fn to_tracks(items: Vec<dto::SearchItem>) -> Vec<Track> {
    items
        .into_iter()
        .filter(|item| item.item_type == "video")
        .filter_map(|item| {
            Some(Track {
                id: item.video_id?,
                title: item.title?,
                artists: item.author.unwrap_or_default(),
                album: SINGLE_ALBUM.to_string(),
                duration: format_duration(item.length_seconds),
            })
        })
        .collect()
}

/// Convert a single video response to a track.
pub fn to_track(video: &dto::VideoResponse) -> Track {
    Track {
        id: video.video_id.clone(),
        title: video.title.clone(),
        artists: video.author.clone(),
        album: SINGLE_ALBUM.to_string(),
        duration: format_duration(video.length_seconds),
    }
}

/// Pick the best audio format: highest bitrate among `audio/*` entries.
pub fn best_audio_format(formats: &[dto::AdaptiveFormat]) -> Option<&dto::AdaptiveFormat> {
    formats
        .iter()
        .filter(|f| f.mime_type.starts_with("audio/"))
        .max_by_key(|f| parse_bitrate(f.bitrate.as_deref()))
}

/// File extension for a cached copy of the given format.
pub fn extension_for(format: &dto::AdaptiveFormat) -> &'static str {
    if format.mime_type.starts_with("audio/webm") {
        "webm"
    } else {
        // audio/mp4 and anything unrecognized
        "m4a"
    }
}

/// Render a duration in seconds as a display string ("m:ss", or
/// "h:mm:ss" past the hour). `None` renders as "N/A" like the catalog's
/// own placeholder.
pub fn format_duration(length_seconds: Option<u64>) -> String {
    let Some(secs) = length_seconds else {
        return "N/A".to_string();
    };
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// The API sends bitrate as a decimal string; unparsable values sort last.
fn parse_bitrate(bitrate: Option<&str>) -> u64 {
    bitrate.and_then(|b| b.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_item(id: &str, title: &str, secs: Option<u64>) -> dto::SearchItem {
        dto::SearchItem {
            item_type: "video".to_string(),
            video_id: Some(id.to_string()),
            title: Some(title.to_string()),
            author: Some("Test Artist".to_string()),
            length_seconds: secs,
        }
    }

    fn audio_format(mime: &str, bitrate: &str) -> dto::AdaptiveFormat {
        dto::AdaptiveFormat {
            url: format!("https://example.invalid/{bitrate}"),
            mime_type: mime.to_string(),
            bitrate: Some(bitrate.to_string()),
            itag: None,
        }
    }

    #[test]
    fn test_to_tracks_filters_non_videos() {
        let items = vec![
            video_item("abc123", "Song", Some(212)),
            dto::SearchItem {
                item_type: "channel".to_string(),
                video_id: None,
                title: None,
                author: Some("Some Channel".to_string()),
                length_seconds: None,
            },
        ];

        let tracks = to_tracks(items);

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "abc123");
        assert_eq!(tracks[0].album, SINGLE_ALBUM);
        assert_eq!(tracks[0].duration, "3:32");
    }

    #[test]
    fn test_to_tracks_preserves_order() {
        let items = vec![
            video_item("first", "A", Some(1)),
            video_item("second", "B", Some(2)),
        ];

        let tracks = to_tracks(items);

        assert_eq!(tracks[0].id, "first");
        assert_eq!(tracks[1].id, "second");
    }

    #[test]
    fn test_best_audio_format_picks_highest_bitrate() {
        let formats = vec![
            audio_format("video/mp4; codecs=\"avc1\"", "2000000"),
            audio_format("audio/webm; codecs=\"opus\"", "110000"),
            audio_format("audio/mp4; codecs=\"mp4a.40.2\"", "130797"),
        ];

        let best = best_audio_format(&formats).unwrap();

        assert_eq!(best.bitrate.as_deref(), Some("130797"));
        assert!(best.mime_type.starts_with("audio/mp4"));
    }

    #[test]
    fn test_best_audio_format_none_when_no_audio() {
        let formats = vec![audio_format("video/mp4", "2000000")];
        assert!(best_audio_format(&formats).is_none());
    }

    #[test]
    fn test_extension_for_format() {
        assert_eq!(extension_for(&audio_format("audio/webm; codecs=\"opus\"", "1")), "webm");
        assert_eq!(extension_for(&audio_format("audio/mp4", "1")), "m4a");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(0)), "0:00");
        assert_eq!(format_duration(Some(59)), "0:59");
        assert_eq!(format_duration(Some(212)), "3:32");
        assert_eq!(format_duration(Some(3725)), "1:02:05");
        assert_eq!(format_duration(None), "N/A");
    }

}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Rendered durations under an hour parse back to the same seconds
        #[test]
        fn format_duration_roundtrips_under_an_hour(secs in 0u64..3600) {
            let rendered = format_duration(Some(secs));
            let (m, s) = rendered.split_once(':').unwrap();
            let m: u64 = m.parse().unwrap();
            let s: u64 = s.parse().unwrap();
            prop_assert!(s < 60);
            prop_assert_eq!(m * 60 + s, secs);
        }

        /// The selected format is always an audio format when one exists
        #[test]
        fn best_format_is_always_audio(bitrates in prop::collection::vec("[0-9]{1,7}", 0..8)) {
            let formats: Vec<_> = bitrates
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    let mime = if i % 2 == 0 { "audio/mp4" } else { "video/mp4" };
                    dto::AdaptiveFormat {
                        url: format!("https://example.invalid/{b}"),
                        mime_type: mime.to_string(),
                        bitrate: Some(b.clone()),
                        itag: None,
                    }
                })
                .collect();

            match best_audio_format(&formats) {
                Some(best) => prop_assert!(best.mime_type.starts_with("audio/")),
                None => prop_assert!(formats.iter().all(|f| !f.mime_type.starts_with("audio/"))),
            }
        }
    }
}
