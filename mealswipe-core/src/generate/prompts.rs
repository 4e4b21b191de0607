//! Prompt templates for recipe generation.

/// Render the prompt asking for a corrected recipe name.
pub fn render_name_correction_prompt(name: &str) -> String {
    format!(
        r#"You are a culinary expert. Please correct the spelling and formatting of this recipe name: "{name}".
Consider:
1. Common recipe name misspellings (e.g., "futtucini" -> "fettuccine")
2. Proper capitalization (e.g., "pad thai" -> "Pad Thai")
3. Traditional spellings (e.g., "curry puff" -> "Karipap")
4. Regional variations (e.g., "expresso" -> "Espresso")

Return ONLY the corrected name, nothing else. If the name is already correct, return it as is."#,
        name = name
    )
}

/// Render the prompt asking for a full recipe as JSON.
pub fn render_generate_recipe_prompt(
    recipe_name: &str,
    cuisine: Option<&str>,
    dietary_preferences: &[String],
) -> String {
    let cuisine = cuisine
        .map(|c| format!(" in {c} cuisine style"))
        .unwrap_or_default();
    let diets = if dietary_preferences.is_empty() {
        String::new()
    } else {
        format!(
            " that is suitable for {} diets",
            dietary_preferences.join(", ")
        )
    };

    format!(
        r#"Generate a detailed recipe for "{recipe_name}"{cuisine}{diets}.

Please provide the response in the following JSON format:
{{
  "strCategory": "Main category of the dish (e.g., Beef, Chicken, Vegetarian, Dessert)",
  "strArea": "Cuisine origin or area",
  "strInstructions": "Detailed step-by-step cooking instructions",
  "ingredients": ["List of ingredients"],
  "measures": ["List of measurements corresponding to ingredients"],
  "strMealThumb": "A URL to a real, existing image of this dish from a major recipe website or food blog"
}}

Make sure:
1. The ingredients and measures arrays have matching lengths and correspond to each other
2. The image URL is from a reputable source and shows a similar dish
3. The image URL ends with a common image extension (e.g., .jpg, .jpeg, .png)
4. The instructions are clear and detailed"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_prompt_quotes_input() {
        let prompt = render_name_correction_prompt("futtucini alfredo");
        assert!(prompt.contains("\"futtucini alfredo\""));
        assert!(prompt.contains("Return ONLY the corrected name"));
    }

    #[test]
    fn test_recipe_prompt_options() {
        let plain = render_generate_recipe_prompt("Pad Thai", None, &[]);
        assert!(plain.starts_with("Generate a detailed recipe for \"Pad Thai\".\n"));
        assert!(plain.contains("\"strMealThumb\""));

        let styled = render_generate_recipe_prompt(
            "Pad Thai",
            Some("Thai"),
            &["vegan".to_string(), "gluten-free".to_string()],
        );
        assert!(styled.starts_with(
            "Generate a detailed recipe for \"Pad Thai\" in Thai cuisine style that is suitable for vegan, gluten-free diets."
        ));
    }
}
