use std::time::Duration;

use log::{debug, error, warn};

use crate::config::AppConfig;
use crate::error::ImportError;
use crate::extractors::{CookpadExtractor, DelishKitchenExtractor, SiteExtractor};
use crate::fetchers::{Fetcher, RequestFetcher};
use crate::model::RecipeDetail;
use crate::pipelines::{self, Source};
use crate::providers::{LlmProvider, ProviderFactory};
use crate::youtube::{extract_video_id, VideoMetadataService, YouTubeDataApi};

const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Imports recipes from any supported URL.
///
/// Holds the page fetcher, the video metadata service and the language model
/// provider. The last two are optional; the handlers that need them fail with
/// [`ImportError::ProviderUnavailable`] when they are missing.
pub struct RecipeImporter {
    fetcher: Box<dyn Fetcher>,
    video_service: Option<Box<dyn VideoMetadataService>>,
    llm_provider: Option<Box<dyn LlmProvider>>,
    max_tokens: u32,
}

impl RecipeImporter {
    /// Create a new builder for configuring an importer
    ///
    /// # Example
    /// ```no_run
    /// use repirecipe_import::RecipeImporter;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let importer = RecipeImporter::builder().build()?;
    /// let recipe = importer
    ///     .import("https://cookpad.com/jp/recipes/22640981")
    ///     .await?;
    /// println!("{}", recipe.title);
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }

    /// Import a recipe from `url`, picking the handler from the URL.
    pub async fn import(&self, url: &str) -> Result<RecipeDetail, ImportError> {
        let url = url.trim();
        let handler = match self.route(url) {
            Ok(handler) => handler,
            Err(e) => {
                error!("Cannot import recipe from {}: {}", url, e);
                return Err(e);
            }
        };

        match handler {
            Handler::Site(extractor) => {
                pipelines::site::process(self.fetcher.as_ref(), extractor, url).await
            }
            Handler::Video(service, provider) => {
                pipelines::video::process(service, provider, url, self.max_tokens).await
            }
            Handler::Web(provider) => {
                pipelines::web::process(self.fetcher.as_ref(), provider, url, self.max_tokens)
                    .await
            }
        }
    }

    /// Pick the handler for `url` and check that the services it needs are
    /// configured. A malformed video URL is reported before missing services.
    fn route(&self, url: &str) -> Result<Handler<'_>, ImportError> {
        let source = Source::detect(url)?;
        debug!("Importing {} as {:?}", url, source);

        let handler = match source {
            Source::Cookpad => Handler::Site(&CookpadExtractor),
            Source::DelishKitchen => Handler::Site(&DelishKitchenExtractor),
            Source::YouTube => {
                extract_video_id(url)?;
                Handler::Video(self.video_service()?, self.llm_provider()?)
            }
            Source::Web => Handler::Web(self.llm_provider()?),
        };

        Ok(handler)
    }

    fn video_service(&self) -> Result<&dyn VideoMetadataService, ImportError> {
        self.video_service.as_deref().ok_or_else(|| {
            ImportError::ProviderUnavailable(
                "No video metadata service configured (set YOUTUBE_API_KEY)".to_string(),
            )
        })
    }

    fn llm_provider(&self) -> Result<&dyn LlmProvider, ImportError> {
        self.llm_provider.as_deref().ok_or_else(|| {
            ImportError::ProviderUnavailable("No LLM provider configured".to_string())
        })
    }
}

enum Handler<'a> {
    Site(&'a dyn SiteExtractor),
    Video(&'a dyn VideoMetadataService, &'a dyn LlmProvider),
    Web(&'a dyn LlmProvider),
}

/// Builder for configuring a [`RecipeImporter`]
#[derive(Default)]
pub struct RecipeImporterBuilder {
    fetcher: Option<Box<dyn Fetcher>>,
    video_service: Option<Box<dyn VideoMetadataService>>,
    llm_provider: Option<Box<dyn LlmProvider>>,
    config: Option<AppConfig>,
    timeout: Option<Duration>,
    max_tokens: Option<u32>,
}

impl RecipeImporterBuilder {
    /// Use a custom page fetcher instead of the HTTP one
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Use a custom video metadata service instead of the YouTube Data API
    pub fn video_service(mut self, service: impl VideoMetadataService + 'static) -> Self {
        self.video_service = Some(Box::new(service));
        self
    }

    /// Use a custom language model provider
    pub fn llm_provider(mut self, provider: impl LlmProvider + 'static) -> Self {
        self.llm_provider = Some(Box::new(provider));
        self
    }

    /// Create missing services from this configuration
    ///
    /// Services that can't be created (usually for lack of an API key) are
    /// left out and logged.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use repirecipe_import::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the output token bound of the ingredient extraction call
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Build the importer
    ///
    /// # Errors
    /// Returns `ImportError` if the HTTP client can't be created or
    /// `max_tokens` is zero.
    pub fn build(self) -> Result<RecipeImporter, ImportError> {
        let timeout = self.timeout.or_else(|| {
            self.config
                .as_ref()
                .map(|config| Duration::from_secs(config.timeout))
        });

        let max_tokens = self
            .max_tokens
            .or_else(|| {
                self.config
                    .as_ref()
                    .map(|config| config.default_provider_config().max_tokens)
            })
            .unwrap_or(DEFAULT_MAX_TOKENS);
        if max_tokens == 0 {
            return Err(ImportError::BuilderError(
                "max_tokens must be greater than zero".to_string(),
            ));
        }

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(RequestFetcher::new(timeout)?),
        };

        let video_service = self.video_service.or_else(|| {
            let config = self.config.as_ref()?;
            match YouTubeDataApi::from_config(&config.youtube, timeout) {
                Ok(api) => Some(Box::new(api) as Box<dyn VideoMetadataService>),
                Err(e) => {
                    warn!("YouTube import disabled: {}", e);
                    None
                }
            }
        });

        let llm_provider = self.llm_provider.or_else(|| {
            let config = self.config.as_ref()?;
            match ProviderFactory::get_default_provider(config) {
                Ok(provider) => Some(provider),
                Err(e) => {
                    warn!("LLM ingredient extraction disabled: {}", e);
                    None
                }
            }
        });

        Ok(RecipeImporter {
            fetcher,
            video_service,
            llm_provider,
            max_tokens,
        })
    }
}
