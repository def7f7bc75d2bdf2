use crate::error::ImportError;
use crate::extractors::{ParsingContext, SiteExtractor};
use crate::fetchers::Fetcher;
use crate::model::RecipeDetail;
use log::{error, info};

/// Fetch a recipe page and run the site's markup lookups over it.
///
/// Only fetch failures (network errors, non-success status) fail the call;
/// a page without the expected markup still yields a recipe with empty
/// fields.
pub async fn process(
    fetcher: &dyn Fetcher,
    extractor: &dyn SiteExtractor,
    url: &str,
) -> Result<RecipeDetail, ImportError> {
    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            error!(
                "Failed to fetch {} recipe from {}: {}",
                extractor.site_name(),
                url,
                e
            );
            return Err(e);
        }
    };

    let recipe = extractor.parse(&ParsingContext::new(url, &html));
    info!(
        "Extracted {} recipe {:?} with {} ingredients",
        extractor.site_name(),
        recipe.title,
        recipe.ingredients.len()
    );

    Ok(recipe)
}
