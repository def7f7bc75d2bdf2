//! Turning a language model completion into an ingredient list.

use crate::error::ImportError;
use crate::model::Ingredient;
use crate::providers::{build_extraction_prompt, LlmProvider};
use log::{debug, warn};
use serde_json::Value;

/// Memo prefix used when the model output can't be parsed. The source text
/// follows it so nothing is lost.
pub const EXTRACTION_FAILURE_MEMO: &str = "材料の取得に失敗しました。\n\n";

/// Dot characters models write in place of the dish-name prefix.
const LOOKALIKE_DOTS: &[char] = &['・', '·', '•', '･', '*'];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedIngredients {
    pub ingredients: Vec<Ingredient>,
    pub memo: String,
}

/// Ask the provider for the ingredients in `source_text` and parse the answer.
///
/// Only a failing service call is an error; an unusable answer falls back to
/// an empty list with the source text kept in the memo.
pub async fn extract_ingredients(
    provider: &dyn LlmProvider,
    source_text: &str,
    max_tokens: u32,
) -> Result<ExtractedIngredients, ImportError> {
    let prompt = build_extraction_prompt(source_text);
    let completion = provider.complete(&prompt, max_tokens).await?;
    Ok(parse_completion(&completion, source_text))
}

/// Parse a completion that should be a JSON array of ingredient objects.
pub fn parse_completion(completion: &str, source_text: &str) -> ExtractedIngredients {
    let body = strip_code_fence(completion.trim());

    match serde_json::from_str::<Vec<Value>>(body) {
        Ok(entries) => {
            debug!("Model returned {} entries", entries.len());
            ExtractedIngredients {
                ingredients: entries.iter().filter_map(to_ingredient).collect(),
                memo: String::new(),
            }
        }
        Err(e) => {
            warn!("Model output is not a JSON array ({}): {}", e, completion);
            ExtractedIngredients {
                ingredients: Vec::new(),
                memo: format!("{EXTRACTION_FAILURE_MEMO}{source_text}"),
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop the language tag, whether or not a newline follows it
    let tag_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let body = rest[tag_len..].trim();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn to_ingredient(entry: &Value) -> Option<Ingredient> {
    let Some(name) = entry.get("ingredientName").and_then(Value::as_str) else {
        debug!("Dropping entry without ingredientName: {}", entry);
        return None;
    };
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let amount = match entry.get("amount") {
        Some(Value::String(amount)) => amount.trim().to_string(),
        Some(Value::Number(amount)) => amount.to_string(),
        _ => String::new(),
    };

    if amount.is_empty() {
        Some(retag_marker(name))
    } else {
        Some(Ingredient::new(name, amount))
    }
}

/// Normalize a dish-name marker written with a look-alike dot. Section
/// labels and unquantified ingredients pass through unchanged.
fn retag_marker(name: &str) -> Ingredient {
    match name.strip_prefix(LOOKALIKE_DOTS) {
        Some(dish) if !dish.trim().is_empty() => Ingredient::dish_marker(dish),
        _ => Ingredient::new(name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const DESCRIPTION: &str = "【材料】\n鶏もも肉 300g\n片栗粉 大さじ3\nInstagram → @cook_with_me";

    #[test]
    fn test_parse_valid_array() {
        let completion = r#"[
            {"ingredientName": "・唐揚げ", "amount": ""},
            {"ingredientName": "鶏もも肉", "amount": "300g"},
            {"ingredientName": "衣", "amount": ""},
            {"ingredientName": "片栗粉", "amount": "大さじ3"}
        ]"#;

        let result = parse_completion(completion, DESCRIPTION);

        assert_eq!(
            result.ingredients,
            vec![
                Ingredient::new("・唐揚げ", ""),
                Ingredient::new("鶏もも肉", "300g"),
                Ingredient::new("衣", ""),
                Ingredient::new("片栗粉", "大さじ3"),
            ]
        );
        assert_eq!(result.memo, "");
    }

    #[test]
    fn test_malformed_output_keeps_source_text() {
        let result = parse_completion(r#"["not json""#, DESCRIPTION);

        assert!(result.ingredients.is_empty());
        assert!(result.memo.starts_with(EXTRACTION_FAILURE_MEMO));
        assert!(result.memo.ends_with(DESCRIPTION));
        assert_eq!(result.memo, format!("{EXTRACTION_FAILURE_MEMO}{DESCRIPTION}"));
    }

    #[test]
    fn test_prose_output_falls_back() {
        let result = parse_completion("Here are the ingredients: salt, pepper", DESCRIPTION);

        assert!(result.ingredients.is_empty());
        assert!(result.memo.starts_with(EXTRACTION_FAILURE_MEMO));
    }

    #[test]
    fn test_non_array_json_falls_back() {
        let result = parse_completion(r#"{"ingredientName": "塩", "amount": "少々"}"#, DESCRIPTION);

        assert!(result.ingredients.is_empty());
        assert!(result.memo.ends_with(DESCRIPTION));
    }

    #[test]
    fn test_empty_array() {
        let result = parse_completion("[]", DESCRIPTION);

        assert!(result.ingredients.is_empty());
        assert_eq!(result.memo, "");
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let completion = "```json\n[{\"ingredientName\": \"卵\", \"amount\": \"2個\"}]\n```";

        let result = parse_completion(completion, DESCRIPTION);

        assert_eq!(result.ingredients, vec![Ingredient::new("卵", "2個")]);
    }

    #[test]
    fn test_single_line_code_fence_is_stripped() {
        for completion in [
            "```json [{\"ingredientName\": \"卵\", \"amount\": \"2個\"}]```",
            "```json[{\"ingredientName\": \"卵\", \"amount\": \"2個\"}]```",
            "```[{\"ingredientName\": \"卵\", \"amount\": \"2個\"}]```",
            "```json [\n{\"ingredientName\": \"卵\", \"amount\": \"2個\"}\n]\n```",
        ] {
            let result = parse_completion(completion, DESCRIPTION);

            assert_eq!(
                result.ingredients,
                vec![Ingredient::new("卵", "2個")],
                "{completion}"
            );
            assert_eq!(result.memo, "");
        }
    }

    #[test]
    fn test_entries_are_normalized() {
        let completion = r#"[
            {"ingredientName": "· 親子丼", "amount": null},
            {"ingredientName": "  玉ねぎ ", "amount": " 1/2個 "},
            {"ingredientName": "卵", "amount": 3},
            {"ingredientName": "三つ葉"},
            {"ingredientName": "", "amount": "1本"},
            {"amount": "100ml"},
            "stray string"
        ]"#;

        let result = parse_completion(completion, DESCRIPTION);

        assert_eq!(
            result.ingredients,
            vec![
                Ingredient::new("・親子丼", ""),
                Ingredient::new("玉ねぎ", "1/2個"),
                Ingredient::new("卵", "3"),
                Ingredient::new("三つ葉", ""),
            ]
        );
        assert!(result.ingredients[0].is_dish_marker());
    }

    #[test]
    fn test_bare_dot_is_not_a_marker() {
        let result = parse_completion(r#"[{"ingredientName": "•", "amount": ""}]"#, "");

        assert_eq!(result.ingredients, vec![Ingredient::new("•", "")]);
    }

    struct RecordingProvider {
        completion: String,
        calls: Mutex<Vec<(String, u32)>>,
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        fn provider_name(&self) -> &str {
            "recording"
        }

        async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ImportError> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), max_tokens));
            Ok(self.completion.clone())
        }
    }

    #[tokio::test]
    async fn test_extract_ingredients_sends_prompt_once() {
        let provider = RecordingProvider {
            completion: r#"[{"ingredientName": "鶏もも肉", "amount": "300g"}]"#.to_string(),
            calls: Mutex::new(Vec::new()),
        };

        let result = extract_ingredients(&provider, DESCRIPTION, 4000)
            .await
            .unwrap();

        assert_eq!(result.ingredients, vec![Ingredient::new("鶏もも肉", "300g")]);
        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains(DESCRIPTION));
        assert_eq!(calls[0].1, 4000);
    }
}
