use crate::error::ImportError;
use crate::ingredients::extract_ingredients;
use crate::model::RecipeDetail;
use crate::providers::LlmProvider;
use crate::youtube::{extract_video_id, VideoMetadataService};
use log::{debug, error, info};

/// What the metadata service tells us about a video
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    /// Medium-resolution thumbnail, when the service has one
    pub thumbnail_url: Option<String>,
    pub url: String,
}

/// Resolve the video id from `url` and look the video up.
pub async fn fetch_metadata(
    service: &dyn VideoMetadataService,
    url: &str,
) -> Result<VideoMetadata, ImportError> {
    let video_id = extract_video_id(url)?;
    let snippet = service
        .fetch_snippet(video_id)
        .await?
        .ok_or_else(|| ImportError::VideoNotFound(video_id.to_string()))?;

    debug!(
        "Video {} is {:?} by {:?}",
        video_id, snippet.title, snippet.channel_title
    );

    Ok(VideoMetadata {
        video_id: video_id.to_string(),
        title: snippet.title,
        description: snippet.description,
        channel_title: snippet.channel_title,
        thumbnail_url: snippet.thumbnails.medium.map(|thumbnail| thumbnail.url),
        url: url.to_string(),
    })
}

/// Build a recipe from a video: metadata for the title and thumbnail, the
/// language model for the ingredients in the description.
pub async fn process(
    service: &dyn VideoMetadataService,
    provider: &dyn LlmProvider,
    url: &str,
    max_tokens: u32,
) -> Result<RecipeDetail, ImportError> {
    let result = import(service, provider, url, max_tokens).await;
    if let Err(e) = &result {
        error!("Failed to import recipe from video {}: {}", url, e);
    }
    result
}

async fn import(
    service: &dyn VideoMetadataService,
    provider: &dyn LlmProvider,
    url: &str,
    max_tokens: u32,
) -> Result<RecipeDetail, ImportError> {
    let metadata = fetch_metadata(service, url).await?;
    let extracted = extract_ingredients(provider, &metadata.description, max_tokens).await?;

    let mut recipe = RecipeDetail::new(metadata.title, metadata.url)
        .with_ingredients(extracted.ingredients)
        .with_memo(extracted.memo);
    if let Some(thumbnail) = metadata.thumbnail_url {
        recipe = recipe.with_thumbnail(thumbnail);
    }

    info!(
        "Extracted video recipe {:?} with {} ingredients via {}",
        recipe.title,
        recipe.ingredients.len(),
        provider.provider_name()
    );

    Ok(recipe)
}
