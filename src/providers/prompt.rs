/// Instruction prompt for pulling an ingredient list out of free text.
///
/// Loaded from `prompt.txt` at compile time; `{{description}}` marks where the
/// source text is inserted.
pub const INGREDIENT_EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

const DESCRIPTION_PLACEHOLDER: &str = "{{description}}";

/// Build the extraction prompt around the given description text.
pub fn build_extraction_prompt(description: &str) -> String {
    INGREDIENT_EXTRACTION_PROMPT.replace(DESCRIPTION_PLACEHOLDER, description)
}
