use serde::{Deserialize, Serialize};

/// Collection holding a user's liked (and authored) recipes.
pub const LIKED_RECIPES: &str = "liked_recipes";

/// Collection holding a user's customized copies of recipes.
pub const USER_RECIPES: &str = "user_recipes";

/// Canonical recipe record, field names as stored in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub id_meal: String,
    pub str_meal: String,
    pub str_category: String,
    pub str_instructions: String,
    pub str_meal_thumb: String,
    pub str_area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub str_social_media_link: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub measures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked_at: Option<String>,
    #[serde(default)]
    pub is_customized: bool,
}

impl Recipe {
    /// Ingredient/measure pairs, stopping at the shorter of the two lists.
    pub fn ingredient_lines(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ingredients
            .iter()
            .zip(self.measures.iter())
            .map(|(i, m)| (i.as_str(), m.as_str()))
    }
}

/// Outcome of running a raw document through the sanitizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitized_recipe: Option<Recipe>,
}

impl ValidationResult {
    pub(crate) fn rejected(marker: &str) -> Self {
        Self {
            is_valid: false,
            missing_fields: vec![marker.to_string()],
            sanitized_recipe: None,
        }
    }
}

/// A draft recipe as entered by a user (authoring or editing).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub str_meal: String,
    pub str_category: String,
    pub str_instructions: String,
    #[serde(default)]
    pub str_area: String,
    #[serde(default)]
    pub str_meal_thumb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub str_social_media_link: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub measures: Vec<String>,
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            str_meal: recipe.str_meal.clone(),
            str_category: recipe.str_category.clone(),
            str_instructions: recipe.str_instructions.clone(),
            str_area: recipe.str_area.clone(),
            str_meal_thumb: recipe.str_meal_thumb.clone(),
            str_social_media_link: recipe.str_social_media_link.clone(),
            ingredients: recipe.ingredients.clone(),
            measures: recipe.measures.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_serializes_with_document_field_names() {
        let recipe = Recipe {
            id: "52772".to_string(),
            id_meal: "52772".to_string(),
            str_meal: "Teriyaki Chicken Casserole".to_string(),
            is_customized: true,
            ..Default::default()
        };

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["idMeal"], "52772");
        assert_eq!(value["strMeal"], "Teriyaki Chicken Casserole");
        assert_eq!(value["isCustomized"], true);
        assert!(value.get("likedAt").is_none());
        assert!(value.get("strSocialMediaLink").is_none());
    }

    #[test]
    fn test_ingredient_lines_stop_at_shorter_list() {
        let recipe = Recipe {
            ingredients: vec!["Flour".to_string(), "Sugar".to_string()],
            measures: vec!["1 cup".to_string()],
            ..Default::default()
        };

        let lines: Vec<_> = recipe.ingredient_lines().collect();
        assert_eq!(lines, vec![("Flour", "1 cup")]);
    }
}
