use crate::extractors::{
    collect_ingredients, element_text, IngredientSelectors, ParsingContext, SiteExtractor,
};
use crate::model::RecipeDetail;
use lazy_static::lazy_static;
use log::debug;
use scraper::{ElementRef, Selector};

lazy_static! {
    static ref TITLE: Selector =
        Selector::parse("h1[data-v-ee886a7e]").expect("valid title selector");
    static ref TITLE_LEAD: Selector = Selector::parse("span.lead").expect("valid lead selector");
    static ref TITLE_TEXT: Selector = Selector::parse("span.title").expect("valid text selector");
    static ref VIDEO: Selector = Selector::parse("video.video-js").expect("valid video selector");
    static ref INGREDIENTS_LIST: Selector =
        Selector::parse("div.recipe-ingredients").expect("valid container selector");
    static ref INGREDIENT_ITEM: Selector =
        Selector::parse("li.ingredient").expect("valid item selector");
    static ref INGREDIENT_NAME: Selector =
        Selector::parse("span.ingredient-name").expect("valid name selector");
    static ref INGREDIENT_AMOUNT: Selector =
        Selector::parse("span.ingredient-serving").expect("valid amount selector");
}

/// Recipe pages on delishkitchen.tv
pub struct DelishKitchenExtractor;

/// The heading is split into a lead line and the dish name; join them when
/// both are present, otherwise take the whole heading text.
fn heading_text(heading: ElementRef) -> String {
    match (
        heading.select(&TITLE_LEAD).next(),
        heading.select(&TITLE_TEXT).next(),
    ) {
        (Some(lead), Some(title)) => format!("{} {}", element_text(lead), element_text(title)),
        _ => element_text(heading),
    }
}

/// The video poster is the thumbnail; lazily loaded players only carry it
/// in `data-poster`.
fn poster_url(video: ElementRef) -> String {
    let element = video.value();
    element
        .attr("poster")
        .filter(|poster| !poster.is_empty())
        .or_else(|| element.attr("data-poster"))
        .unwrap_or_default()
        .to_string()
}

impl SiteExtractor for DelishKitchenExtractor {
    fn site_name(&self) -> &str {
        "delishkitchen"
    }

    fn parse(&self, context: &ParsingContext) -> RecipeDetail {
        let document = &context.document;

        let title = document
            .select(&TITLE)
            .next()
            .map(heading_text)
            .unwrap_or_default();

        let thumbnail = document
            .select(&VIDEO)
            .next()
            .map(poster_url)
            .unwrap_or_default();

        let ingredients = collect_ingredients(
            document,
            &IngredientSelectors {
                container: &INGREDIENTS_LIST,
                item: &INGREDIENT_ITEM,
                name: &INGREDIENT_NAME,
                amount: &INGREDIENT_AMOUNT,
            },
        );

        debug!(
            "delishkitchen: title={:?}, {} ingredients",
            title,
            ingredients.len()
        );

        RecipeDetail::new(title, &context.url)
            .with_thumbnail(thumbnail)
            .with_ingredients(ingredients)
    }
}
