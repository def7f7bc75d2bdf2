use crate::error::ImportError;
use crate::extractors::JsonLdExtractor;
use crate::fetchers::Fetcher;
use crate::ingredients::extract_ingredients;
use crate::model::RecipeDetail;
use crate::providers::LlmProvider;
use lazy_static::lazy_static;
use log::{debug, error, info};
use scraper::{Html, Node, Selector};

/// Upper bound on page text sent to the model when there is no JSON-LD.
const MAX_PAGE_TEXT_CHARS: usize = 1200;

lazy_static! {
    static ref OG_TITLE: Selector =
        Selector::parse("meta[property='og:title']").expect("valid og:title selector");
    static ref OG_IMAGE: Selector =
        Selector::parse("meta[property='og:image']").expect("valid og:image selector");
    static ref TITLE: Selector = Selector::parse("title").expect("valid title selector");
    static ref BODY: Selector = Selector::parse("body").expect("valid body selector");
}

/// What a generic page offers before the model sees it
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub text: String,
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Whitespace-normalized text of the body, without script and style contents.
fn visible_text(document: &Html) -> String {
    let Some(body) = document.select(&BODY).next() else {
        return String::new();
    };

    let mut words = Vec::new();
    for node in body.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| matches!(name, "script" | "style" | "noscript"));
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

/// Read the title, thumbnail and model input from a page. A JSON-LD recipe
/// wins; otherwise the page's own metadata and truncated body text are used.
pub fn read_page(html: &str) -> PageContent {
    let document = Html::parse_document(html);

    let page_title = || {
        meta_content(&document, &OG_TITLE).or_else(|| {
            document
                .select(&TITLE)
                .next()
                .map(|title| title.text().collect::<String>().trim().to_string())
        })
    };
    let page_image = || meta_content(&document, &OG_IMAGE);

    if let Some(recipe) = JsonLdExtractor.parse(&document) {
        debug!("Using JSON-LD recipe {:?}", recipe.name);
        let title = if recipe.name.is_empty() {
            page_title().unwrap_or_default()
        } else {
            recipe.name.clone()
        };
        return PageContent {
            title,
            thumbnail_url: recipe.image.clone().or_else(page_image),
            text: recipe.to_prompt_text(),
        };
    }

    debug!("No JSON-LD recipe, falling back to page text");
    PageContent {
        title: page_title().unwrap_or_default(),
        thumbnail_url: page_image(),
        text: visible_text(&document)
            .chars()
            .take(MAX_PAGE_TEXT_CHARS)
            .collect(),
    }
}

/// Fetch any recipe page and let the language model pull the ingredients
/// out of it.
pub async fn process(
    fetcher: &dyn Fetcher,
    provider: &dyn LlmProvider,
    url: &str,
    max_tokens: u32,
) -> Result<RecipeDetail, ImportError> {
    let result = import(fetcher, provider, url, max_tokens).await;
    if let Err(e) = &result {
        error!("Failed to import recipe from page {}: {}", url, e);
    }
    result
}

async fn import(
    fetcher: &dyn Fetcher,
    provider: &dyn LlmProvider,
    url: &str,
    max_tokens: u32,
) -> Result<RecipeDetail, ImportError> {
    let html = fetcher.fetch(url).await?;
    let page = read_page(&html);
    let extracted = extract_ingredients(provider, &page.text, max_tokens).await?;

    let mut recipe = RecipeDetail::new(page.title, url)
        .with_ingredients(extracted.ingredients)
        .with_memo(extracted.memo);
    if let Some(thumbnail) = page.thumbnail_url {
        recipe = recipe.with_thumbnail(thumbnail);
    }

    info!(
        "Extracted page recipe {:?} with {} ingredients",
        recipe.title,
        recipe.ingredients.len()
    );

    Ok(recipe)
}
