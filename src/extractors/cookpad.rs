use crate::extractors::{
    collect_ingredients, element_text, IngredientSelectors, ParsingContext, SiteExtractor,
};
use crate::model::RecipeDetail;
use lazy_static::lazy_static;
use log::debug;
use scraper::Selector;

lazy_static! {
    static ref TITLE: Selector =
        Selector::parse("h1[class*='text-cookpad']").expect("valid title selector");
    static ref MAIN_PHOTO: Selector =
        Selector::parse("img[alt*='レシピのメイン写真']").expect("valid photo selector");
    static ref INGREDIENTS_LIST: Selector =
        Selector::parse("div.ingredients-list").expect("valid container selector");
    static ref INGREDIENT_ITEM: Selector =
        Selector::parse("li.justified-quantity-and-name").expect("valid item selector");
    static ref INGREDIENT_NAME: Selector = Selector::parse("span").expect("valid name selector");
    static ref INGREDIENT_AMOUNT: Selector = Selector::parse("bdi").expect("valid amount selector");
}

/// Recipe pages on cookpad.com
pub struct CookpadExtractor;

impl SiteExtractor for CookpadExtractor {
    fn site_name(&self) -> &str {
        "cookpad"
    }

    fn parse(&self, context: &ParsingContext) -> RecipeDetail {
        let document = &context.document;

        let title = document
            .select(&TITLE)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let thumbnail = document
            .select(&MAIN_PHOTO)
            .next()
            .and_then(|img| img.value().attr("src"))
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
            "cookpad: title={:?}, {} ingredients",
            title,
            ingredients.len()
        );

        RecipeDetail::new(title, &context.url)
            .with_thumbnail(thumbnail)
            .with_ingredients(ingredients)
    }
}
