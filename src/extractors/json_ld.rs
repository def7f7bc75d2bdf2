use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use log::debug;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

lazy_static! {
    static ref JSON_LD_SCRIPT: Selector = Selector::parse("script[type='application/ld+json']")
        .expect("valid json-ld selector");
}

/// The parts of a schema.org `Recipe` the generic page handler needs.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonLdRecipe {
    pub name: String,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
}

impl JsonLdRecipe {
    /// Text handed to the ingredient extraction prompt.
    pub fn to_prompt_text(&self) -> String {
        let mut text = String::new();
        if !self.name.is_empty() {
            text.push_str(&self.name);
            text.push_str("\n\n");
        }
        text.push_str(&self.ingredients.join("\n"));
        text
    }
}

#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image: Option<ImageType>,
    #[serde(default, rename = "recipeIngredient")]
    recipe_ingredient: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Object(ImageObject),
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
    Other(Value),
}

impl ImageType {
    fn first_url(self) -> Option<String> {
        match self {
            ImageType::String(url) => Some(url),
            ImageType::Object(img) => Some(img.url),
            ImageType::MultipleStrings(urls) => urls.into_iter().next(),
            ImageType::MultipleObjects(imgs) => imgs.into_iter().next().map(|img| img.url),
            ImageType::Other(_) => None,
        }
    }
}

fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode entities inside JSON-LD
    decode_html_entities(&decode_html_entities(text))
        .trim()
        .to_string()
}

fn is_recipe(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind == "Recipe",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind == "Recipe"),
        _ => false,
    }
}

/// Find the first `Recipe` node in a JSON-LD block: the block itself, an
/// array element, or an `@graph` entry.
fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if is_recipe(json_ld) {
        return Some(json_ld);
    }
    if let Some(items) = json_ld.as_array() {
        return items.iter().find_map(find_recipe);
    }
    json_ld
        .get("@graph")
        .and_then(Value::as_array)
        .and_then(|graph| graph.iter().find(|item| is_recipe(item)))
}

fn sanitize_json(json_str: &str) -> String {
    // trailing commas and stray HTML comments are common in hand-edited blocks
    json_str
        .trim()
        .replace(",]", "]")
        .replace(",}", "}")
        .replace("<!--", "")
        .replace("-->", "")
}

pub struct JsonLdExtractor;

impl JsonLdExtractor {
    pub fn parse(&self, document: &Html) -> Option<JsonLdRecipe> {
        for script in document.select(&JSON_LD_SCRIPT) {
            let cleaned = sanitize_json(&script.inner_html());
            let Ok(json_ld) = serde_json::from_str::<Value>(&cleaned) else {
                debug!("Skipping unparseable JSON-LD block");
                continue;
            };

            let Some(node) = find_recipe(&json_ld) else {
                continue;
            };

            match serde_json::from_value::<RawRecipe>(node.clone()) {
                Ok(raw) => {
                    debug!("Found JSON-LD recipe: {:?}", raw.name);
                    return Some(JsonLdRecipe {
                        name: raw
                            .name
                            .map(|name| decode_html_symbols(&name))
                            .unwrap_or_default(),
                        image: raw.image.and_then(ImageType::first_url),
                        ingredients: raw
                            .recipe_ingredient
                            .iter()
                            .map(|line| decode_html_symbols(line))
                            .filter(|line| !line.is_empty())
                            .collect(),
                    });
                }
                Err(e) => debug!("JSON-LD recipe has unexpected shape: {}", e),
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_html_document(json_ld: &str) -> Html {
        let html = format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <script type="application/ld+json">
                    {}
                </script>
            </head>
            <body></body>
            </html>
            "#,
            json_ld
        );
        Html::parse_document(&html)
    }

    #[test]
    fn test_parse_basic_recipe() {
        let document = create_html_document(
            r#"
            {
                "@context": "https://schema.org/",
                "@type": "Recipe",
                "name": "Chocolate Chip Cookies",
                "image": "https://example.com/cookie.jpg",
                "recipeIngredient": ["2 cups flour", "1 cup sugar", "chocolate chips"]
            }
            "#,
        );

        let recipe = JsonLdExtractor.parse(&document).unwrap();

        assert_eq!(recipe.name, "Chocolate Chip Cookies");
        assert_eq!(recipe.image.as_deref(), Some("https://example.com/cookie.jpg"));
        assert_eq!(
            recipe.ingredients,
            vec!["2 cups flour", "1 cup sugar", "chocolate chips"]
        );
        assert_eq!(
            recipe.to_prompt_text(),
            "Chocolate Chip Cookies\n\n2 cups flour\n1 cup sugar\nchocolate chips"
        );
    }

    #[test]
    fn test_parse_graph_with_image_objects() {
        let document = create_html_document(
            r#"
            {
                "@context": "https://schema.org",
                "@graph": [
                    {"@type": "WebSite", "name": "Recipe Website"},
                    {
                        "@type": ["Recipe", "NewsArticle"],
                        "name": "Mac &amp;amp; Cheese",
                        "image": [{"url": "https://example.com/mac.jpg"}],
                        "recipeIngredient": ["pasta", "  ", "cheddar"]
                    }
                ]
            }
            "#,
        );

        let recipe = JsonLdExtractor.parse(&document).unwrap();

        assert_eq!(recipe.name, "Mac & Cheese");
        assert_eq!(recipe.image.as_deref(), Some("https://example.com/mac.jpg"));
        assert_eq!(recipe.ingredients, vec!["pasta", "cheddar"]);
    }

    #[test]
    fn test_no_recipe_block() {
        let document = create_html_document(r#"{"@type": "Organization", "name": "Acme"}"#);

        assert!(JsonLdExtractor.parse(&document).is_none());
    }
}
