use crate::config::YouTubeConfig;
use crate::error::ImportError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Thumbnail variants by resolution; any of them may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub maxres: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Source of video metadata keyed by video id
#[async_trait]
pub trait VideoMetadataService: Send + Sync {
    /// `Ok(None)` when the service knows no video with this id
    async fn fetch_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>, ImportError>;
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
}

/// Client for the `videos.list` endpoint of the YouTube Data API v3
pub struct YouTubeDataApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeDataApi {
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(30)))
            .build()?;

        Ok(YouTubeDataApi {
            client,
            api_key: api_key.into(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// Create a client from configuration, falling back to YOUTUBE_API_KEY
    pub fn from_config(
        config: &YouTubeConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, ImportError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            ImportError::ProviderUnavailable(
                "YOUTUBE_API_KEY not found in config or environment".to_string(),
            )
        })?;

        Self::new(api_key, config.base_url.clone(), timeout)
    }
}

#[async_trait]
impl VideoMetadataService for YouTubeDataApi {
    async fn fetch_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>, ImportError> {
        let response = self
            .client
            .get(format!("{}/youtube/v3/videos", self.base_url))
            .query(&[("part", "snippet"), ("id", video_id), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ImportError::MetadataError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::MetadataError(format!(
                "YouTube API returned {status}: {body}"
            )));
        }

        let list: VideoListResponse = response
            .json()
            .await
            .map_err(|e| ImportError::MetadataError(e.to_string()))?;
        debug!("YouTube API returned {} item(s) for {}", list.items.len(), video_id);

        Ok(list.items.into_iter().next().map(|item| item.snippet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_fetch_snippet() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/youtube/v3/videos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("part".into(), "snippet".into()),
                Matcher::UrlEncoded("id".into(), "xGKn7TD9jaM".into()),
                Matcher::UrlEncoded("key".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "items": [{
                        "snippet": {
                            "title": "Easy Karaage",
                            "description": "Chicken thigh 300g",
                            "channelTitle": "Home Cooking",
                            "thumbnails": {
                                "default": {"url": "https://i.ytimg.com/vi/xGKn7TD9jaM/default.jpg", "width": 120, "height": 90},
                                "medium": {"url": "https://i.ytimg.com/vi/xGKn7TD9jaM/mqdefault.jpg", "width": 320, "height": 180}
                            }
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let api = YouTubeDataApi::new("test-key", Some(server.url()), None).unwrap();
        let snippet = api.fetch_snippet("xGKn7TD9jaM").await.unwrap().unwrap();

        assert_eq!(snippet.title, "Easy Karaage");
        assert_eq!(snippet.channel_title, "Home Cooking");
        assert_eq!(
            snippet.thumbnails.medium.unwrap().url,
            "https://i.ytimg.com/vi/xGKn7TD9jaM/mqdefault.jpg"
        );
        assert!(snippet.thumbnails.maxres.is_none());
    }

    #[tokio::test]
    async fn test_fetch_snippet_no_items() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/youtube/v3/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"kind": "youtube#videoListResponse", "items": []}"#)
            .create_async()
            .await;

        let api = YouTubeDataApi::new("test-key", Some(server.url()), None).unwrap();

        assert!(api.fetch_snippet("aaaaaaaaaaa").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_snippet_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/youtube/v3/videos")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"code": 403, "message": "quotaExceeded"}}"#)
            .create_async()
            .await;

        let api = YouTubeDataApi::new("test-key", Some(server.url()), None).unwrap();
        let result = api.fetch_snippet("aaaaaaaaaaa").await;

        match result {
            Err(ImportError::MetadataError(message)) => assert!(message.contains("403")),
            other => panic!("expected MetadataError, got {other:?}"),
        }
    }

    #[test]
    fn test_from_config_with_key() {
        let config = YouTubeConfig {
            api_key: Some("yt-key".to_string()),
            base_url: None,
        };

        assert!(YouTubeDataApi::from_config(&config, None).is_ok());
    }
}
