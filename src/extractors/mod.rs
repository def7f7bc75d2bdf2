use crate::model::{Ingredient, RecipeDetail};
use log::debug;
use scraper::{ElementRef, Html, Selector};

mod cookpad;
mod delish_kitchen;
mod json_ld;

pub use cookpad::CookpadExtractor;
pub use delish_kitchen::DelishKitchenExtractor;
pub use json_ld::{JsonLdExtractor, JsonLdRecipe};

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: &str, html: &str) -> Self {
        ParsingContext {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }
}

/// Markup lookups for one recipe website.
///
/// Extraction never fails: anything that can't be located degrades to an
/// empty string or an empty ingredient list.
pub trait SiteExtractor: Send + Sync {
    fn site_name(&self) -> &str;
    fn parse(&self, context: &ParsingContext) -> RecipeDetail;
}

/// Selectors describing where a site keeps its ingredient list.
pub(crate) struct IngredientSelectors<'a> {
    pub container: &'a Selector,
    pub item: &'a Selector,
    pub name: &'a Selector,
    pub amount: &'a Selector,
}

/// Trimmed text content of an element and all its descendants.
pub(crate) fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Walk the first ingredient container and collect every item that has both
/// a name and an amount element. Incomplete items are skipped.
pub(crate) fn collect_ingredients(
    document: &Html,
    selectors: &IngredientSelectors,
) -> Vec<Ingredient> {
    let Some(container) = document.select(selectors.container).next() else {
        debug!("No ingredient container found");
        return Vec::new();
    };

    let mut ingredients = Vec::new();
    for item in container.select(selectors.item) {
        let name = item.select(selectors.name).next();
        let amount = item.select(selectors.amount).next();
        match (name, amount) {
            (Some(name), Some(amount)) => {
                ingredients.push(Ingredient::new(element_text(name), element_text(amount)))
            }
            _ => debug!("Skipping incomplete ingredient item: {}", element_text(item)),
        }
    }

    ingredients
}
