pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod ingredients;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod youtube;

pub use builder::{RecipeImporter, RecipeImporterBuilder};
pub use config::AppConfig;
pub use error::ImportError;
pub use model::{Ingredient, RecipeDetail, DEFAULT_THUMBNAIL_URL};

/// Import a recipe from a URL using configuration from `config.toml` and
/// the environment.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = repirecipe_import::import_recipe("https://youtu.be/dQw4w9WgXcQ").await?;
/// println!("{}", serde_json::to_string_pretty(&recipe)?);
/// # Ok(())
/// # }
/// ```
pub async fn import_recipe(url: &str) -> Result<RecipeDetail, ImportError> {
    let config = AppConfig::load()?;
    RecipeImporter::builder()
        .config(config)
        .build()?
        .import(url)
        .await
}
