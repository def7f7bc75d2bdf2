use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thumbnail used when a source offers none at all.
pub const DEFAULT_THUMBNAIL_URL: &str = "https://example.com/default_thumbnail.jpg";

/// Prefix the model puts in front of dish-name marker entries.
pub const DISH_MARKER_PREFIX: char = '・';

/// One entry of a recipe's ingredient list.
///
/// An entry with an empty `amount` is either an ingredient with no stated
/// quantity or a marker (a dish name or a sub-section label such as a sauce).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub ingredient_name: String,
    pub amount: String,
}

impl Ingredient {
    pub fn new(ingredient_name: impl Into<String>, amount: impl Into<String>) -> Self {
        Ingredient {
            ingredient_name: ingredient_name.into(),
            amount: amount.into(),
        }
    }

    /// A dish-name marker: the name prefixed with `・` and no amount.
    pub fn dish_marker(dish_name: &str) -> Self {
        let name = dish_name.trim().trim_start_matches(DISH_MARKER_PREFIX);
        Ingredient::new(format!("{DISH_MARKER_PREFIX}{}", name.trim_start()), "")
    }

    pub fn is_dish_marker(&self) -> bool {
        self.amount.is_empty() && self.ingredient_name.starts_with(DISH_MARKER_PREFIX)
    }
}

/// The common recipe shape produced by every handler.
///
/// Serializes to `title, thumbnailUrl, videoUrl, ingredients, memo,
/// createdAt, lastCookedAt` in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub title: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub ingredients: Vec<Ingredient>,
    pub memo: String,
    pub created_at: DateTime<Utc>,
    pub last_cooked_at: Option<DateTime<Utc>>,
}

impl RecipeDetail {
    /// Create a recipe stamped with the current time.
    ///
    /// The thumbnail starts as [`DEFAULT_THUMBNAIL_URL`], the ingredient list
    /// and memo start empty.
    pub fn new(title: impl Into<String>, video_url: impl Into<String>) -> Self {
        RecipeDetail {
            title: title.into(),
            thumbnail_url: DEFAULT_THUMBNAIL_URL.to_string(),
            video_url: video_url.into(),
            ingredients: Vec::new(),
            memo: String::new(),
            created_at: Utc::now(),
            last_cooked_at: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = thumbnail_url.into();
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}
