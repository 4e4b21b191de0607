//! AI recipe generation: name correction and full-recipe drafts.

pub mod prompts;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::RecipeError;
use crate::llm::{LlmError, LlmProvider};
use crate::sanitize::{format_timestamp, DEFAULT_AREA, PLACEHOLDER_IMAGE};
use crate::session::UserId;
use crate::store::{user_collection, DocumentStore};
use crate::types::LIKED_RECIPES;

use prompts::{render_generate_recipe_prompt, render_name_correction_prompt};

/// Replies longer than this are explanations, not names.
const MAX_NAME_WORDS: usize = 10;

static JSON_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("Invalid JSON object regex"));

/// What to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub recipe_name: String,
    pub cuisine: Option<String>,
    pub dietary_preferences: Vec<String>,
}

/// A recipe produced by the model, ready to show or save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub str_meal: String,
    pub str_category: String,
    pub str_area: String,
    pub str_instructions: String,
    pub ingredients: Vec<String>,
    pub measures: Vec<String>,
    pub str_meal_thumb: String,
    pub dietary_preferences: Vec<String>,
}

/// The JSON object the model is asked to return. Every field is optional;
/// models drop keys often enough.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ModelRecipe {
    str_category: Option<String>,
    str_area: Option<String>,
    str_instructions: Option<String>,
    ingredients: Vec<String>,
    measures: Vec<String>,
    str_meal_thumb: Option<String>,
}

/// Ask the model to fix the spelling and capitalization of a recipe name.
///
/// Never fails: on a provider error or a rambling reply the input comes back.
pub async fn correct_recipe_name(provider: &dyn LlmProvider, name: &str) -> String {
    let prompt = render_name_correction_prompt(name);
    let reply = match provider.complete(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(name, error = %e, "failed to correct recipe name");
            return name.to_string();
        }
    };

    let corrected = reply.trim();
    if corrected.is_empty() || corrected.split(' ').count() > MAX_NAME_WORDS {
        tracing::debug!(name, "ignoring unusable name correction");
        return name.to_string();
    }
    corrected.to_string()
}

/// Generate a recipe for `request`.
pub async fn generate_recipe(
    provider: &dyn LlmProvider,
    request: &GenerationRequest,
) -> Result<GeneratedRecipe, LlmError> {
    let prompt = render_generate_recipe_prompt(
        &request.recipe_name,
        request.cuisine.as_deref(),
        &request.dietary_preferences,
    );
    let reply = provider.complete(&prompt).await?;
    let recipe = parse_generated(&reply, request)?;
    tracing::info!(
        name = %recipe.str_meal,
        provider = provider.provider_name(),
        ingredients = recipe.ingredients.len(),
        "recipe generated"
    );
    Ok(recipe)
}

fn parse_generated(reply: &str, request: &GenerationRequest) -> Result<GeneratedRecipe, LlmError> {
    let json = JSON_OBJECT_RE
        .find(reply)
        .ok_or_else(|| LlmError::ParseError("no JSON object in generated recipe".to_string()))?;
    let model: ModelRecipe = serde_json::from_str(json.as_str())
        .map_err(|e| LlmError::ParseError(format!("Failed to parse generated recipe: {}", e)))?;

    let str_area = model
        .str_area
        .filter(|a| !a.is_empty())
        .or_else(|| request.cuisine.clone().filter(|c| !c.is_empty()))
        .unwrap_or_else(|| DEFAULT_AREA.to_string());

    let str_meal_thumb = model
        .str_meal_thumb
        .filter(|url| is_usable_thumbnail(url))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    Ok(GeneratedRecipe {
        str_meal: request.recipe_name.clone(),
        str_category: model.str_category.unwrap_or_default(),
        str_area,
        str_instructions: model.str_instructions.unwrap_or_default(),
        ingredients: model.ingredients,
        measures: model.measures,
        str_meal_thumb,
        dietary_preferences: request.dietary_preferences.clone(),
    })
}

fn is_usable_thumbnail(url: &str) -> bool {
    url.starts_with("http") && [".jpg", ".jpeg", ".png"].iter().any(|ext| url.ends_with(ext))
}

/// Add a generated recipe to the user's favorites. Returns the new id.
pub async fn save_generated(
    store: &dyn DocumentStore,
    user: &UserId,
    recipe: &GeneratedRecipe,
    now: DateTime<Utc>,
) -> Result<String, RecipeError> {
    let id = uuid::Uuid::new_v4().to_string();

    let mut doc = match serde_json::to_value(recipe) {
        Ok(Value::Object(doc)) => doc,
        Ok(_) => return Err(RecipeError::InvalidRecipe(recipe.str_meal.clone())),
        Err(e) => return Err(RecipeError::InvalidRecipe(e.to_string())),
    };
    doc.insert("id".to_string(), Value::String(id.clone()));
    doc.insert("userId".to_string(), Value::String(user.as_str().to_string()));
    doc.insert("likedAt".to_string(), Value::String(format_timestamp(now)));

    store
        .set(&user_collection(user, LIKED_RECIPES), &id, Value::Object(doc))
        .await?;
    tracing::info!(user = %user, recipe_id = %id, name = %recipe.str_meal, "generated recipe saved");
    Ok(id)
}
