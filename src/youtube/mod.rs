mod api;

pub use api::{Thumbnail, Thumbnails, VideoMetadataService, VideoSnippet, YouTubeDataApi};

use crate::error::ImportError;
use crate::pipelines::{host_matches, url_host};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Tried in order: watch URL, shorts URL, youtu.be short link. The id is
    // exactly 11 characters, so a longer token does not match.
    static ref VIDEO_URL_PATTERNS: Vec<Regex> = [
        r"https?://(?:www\.|m\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"https?://(?:www\.|m\.)?youtube\.com/shorts/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"https?://youtu\.be/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid video url pattern"))
    .collect();
}

/// Whether the URL's host is YouTube (a recognized shape or not).
pub fn is_youtube_url(url: &str) -> bool {
    url_host(url).is_some_and(|host| {
        host_matches(host, "youtube.com") || host_matches(host, "youtu.be")
    })
}

/// Resolve the 11-character video id from a watch, shorts or youtu.be URL.
///
/// The id must be followed by a non-id character or the end of the URL, so
/// `youtu.be/<12 chars>` is rejected rather than truncated to its first 11
/// characters.
pub fn extract_video_id(url: &str) -> Result<&str, ImportError> {
    VIDEO_URL_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
        .ok_or_else(|| ImportError::InvalidVideoUrl(url.to_string()))
}
