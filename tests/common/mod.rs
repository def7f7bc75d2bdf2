#![allow(dead_code)]

use async_trait::async_trait;
use repirecipe_import::fetchers::Fetcher;
use repirecipe_import::providers::LlmProvider;
use repirecipe_import::youtube::{Thumbnail, Thumbnails, VideoMetadataService, VideoSnippet};
use repirecipe_import::ImportError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serves canned pages by URL; unknown URLs fail like a 404 would.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ImportError::InvalidUrl(format!("no canned page for {url}")))
    }
}

/// Metadata service returning one fixed snippet and recording requested ids.
#[derive(Clone, Default)]
pub struct FakeVideoService {
    pub snippet: Option<VideoSnippet>,
    pub fail_with: Option<String>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl FakeVideoService {
    pub fn returning(snippet: VideoSnippet) -> Self {
        FakeVideoService {
            snippet: Some(snippet),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        FakeVideoService::default()
    }

    pub fn failing(message: &str) -> Self {
        FakeVideoService {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn requested_ids(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoMetadataService for FakeVideoService {
    async fn fetch_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>, ImportError> {
        self.requested.lock().unwrap().push(video_id.to_string());
        if let Some(message) = &self.fail_with {
            return Err(ImportError::MetadataError(message.clone()));
        }
        Ok(self.snippet.clone())
    }
}

/// Provider answering every prompt with the same completion.
#[derive(Clone, Default)]
pub struct FakeProvider {
    pub completion: String,
    pub fail_with: Option<String>,
    pub prompts: Arc<Mutex<Vec<(String, u32)>>>,
}

impl FakeProvider {
    pub fn answering(completion: &str) -> Self {
        FakeProvider {
            completion: completion.to_string(),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        FakeProvider {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<(String, u32)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ImportError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), max_tokens));
        if let Some(message) = &self.fail_with {
            return Err(ImportError::GenerationError(message.clone()));
        }
        Ok(self.completion.clone())
    }
}

pub fn snippet(title: &str, description: &str, medium_thumbnail: Option<&str>) -> VideoSnippet {
    VideoSnippet {
        title: title.to_string(),
        description: description.to_string(),
        channel_title: "Test Kitchen".to_string(),
        thumbnails: Thumbnails {
            default: Some(Thumbnail {
                url: "https://i.ytimg.com/vi/test/default.jpg".to_string(),
                width: Some(120),
                height: Some(90),
            }),
            medium: medium_thumbnail.map(|url| Thumbnail {
                url: url.to_string(),
                width: Some(320),
                height: Some(180),
            }),
            ..Default::default()
        },
    }
}
