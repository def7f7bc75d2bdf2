use thiserror::Error;

/// Errors that can occur while importing a recipe
#[derive(Error, Debug)]
pub enum ImportError {
    /// Network failure or non-success HTTP status while fetching a page
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Input is not an http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// URL does not match any recognized YouTube URL shape
    #[error("Invalid YouTube URL: {0}")]
    InvalidVideoUrl(String),

    /// The metadata service returned no item for the video id
    #[error("Video not found: {0}")]
    VideoNotFound(String),

    /// The video metadata service call itself failed
    #[error("Video metadata request failed: {0}")]
    MetadataError(String),

    /// The text generation service call itself failed
    #[error("Text generation failed: {0}")]
    GenerationError(String),

    /// A handler needs a service that is not configured
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
