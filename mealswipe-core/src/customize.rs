//! Per-user recipe edits and user-authored recipes.
//!
//! A customization is a sanitized copy stored in `users/{uid}/user_recipes`
//! under the original recipe's id. Authored recipes get a fresh id and go
//! straight into the user's favorites.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::RecipeError;
use crate::http::HttpClient;
use crate::library::find_liked_recipe;
use crate::mealdb::MealDbClient;
use crate::notify::{Notification, Notifier};
use crate::sanitize::{format_timestamp, RecipeSanitizer};
use crate::session::UserId;
use crate::store::{recipe_document, user_collection, DocumentStore};
use crate::types::{Recipe, RecipeDraft, ValidationResult, LIKED_RECIPES, USER_RECIPES};

/// Thumbnail given to authored recipes that don't bring their own.
pub const DEFAULT_AUTHORED_THUMB: &str =
    "https://www.themealdb.com/images/media/meals/default.jpg";

fn draft_document(draft: &RecipeDraft) -> Result<serde_json::Map<String, Value>, RecipeError> {
    match serde_json::to_value(draft) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(_) => Err(RecipeError::InvalidRecipe("draft is not an object".to_string())),
        Err(e) => Err(RecipeError::InvalidRecipe(e.to_string())),
    }
}

fn accepted(result: ValidationResult) -> Result<Recipe, RecipeError> {
    match result.sanitized_recipe {
        Some(recipe) if result.is_valid => Ok(recipe),
        _ => Err(RecipeError::Validation {
            missing_fields: result.missing_fields,
        }),
    }
}

/// Save the user's edited version of `original` and tell the user how it went.
pub async fn save_customization(
    store: &dyn DocumentStore,
    user: &UserId,
    sanitizer: &RecipeSanitizer,
    original: &Recipe,
    edited: &RecipeDraft,
    notifier: &dyn Notifier,
    now: DateTime<Utc>,
) -> Result<Recipe, RecipeError> {
    let result = store_customization(store, user, sanitizer, original, edited, now).await;

    match &result {
        Ok(_) => notifier.notify(Notification::success("Recipe updated successfully!")),
        Err(RecipeError::Validation { missing_fields }) => {
            tracing::warn!(
                recipe_id = %original.id,
                missing = %missing_fields.join(", "),
                "customization rejected"
            );
            notifier.notify(
                Notification::error(format!(
                    "Missing required fields: {}",
                    missing_fields.join(", ")
                ))
                .with_title("Validation Error"),
            );
        }
        Err(e) => {
            tracing::error!(recipe_id = %original.id, error = %e, "failed to save customization");
            notifier.notify(Notification::error(
                "Failed to update recipe. Please try again.",
            ));
        }
    }
    result
}

async fn store_customization(
    store: &dyn DocumentStore,
    user: &UserId,
    sanitizer: &RecipeSanitizer,
    original: &Recipe,
    edited: &RecipeDraft,
    now: DateTime<Utc>,
) -> Result<Recipe, RecipeError> {
    let updated_at = format_timestamp(now);

    let mut raw = draft_document(edited)?;
    raw.insert("isCustomized".to_string(), Value::Bool(true));
    if let Some(liked_at) = &original.liked_at {
        raw.insert("likedAt".to_string(), Value::String(liked_at.clone()));
    }

    let recipe = accepted(sanitizer.validate_at(&original.id, &Value::Object(raw), now))?;

    let mut doc = recipe_document(&recipe, user)?;
    doc.insert("originalRecipeId".to_string(), Value::String(original.id.clone()));
    doc.insert("updatedAt".to_string(), Value::String(updated_at));

    store
        .set(&user_collection(user, USER_RECIPES), &original.id, Value::Object(doc))
        .await?;
    tracing::info!(user = %user, recipe_id = %original.id, "customization saved");
    Ok(recipe)
}

/// Drop the user's customization and return the original recipe, read from
/// favorites or, failing that, from MealDB.
pub async fn restore_original<C: HttpClient>(
    store: &dyn DocumentStore,
    mealdb: &MealDbClient<C>,
    user: &UserId,
    sanitizer: &RecipeSanitizer,
    recipe_id: &str,
    notifier: &dyn Notifier,
) -> Result<Recipe, RecipeError> {
    let result = fetch_original(store, mealdb, user, sanitizer, recipe_id).await;

    match &result {
        Ok(_) => notifier.notify(Notification::success("Recipe restored to original version")),
        Err(e) => {
            tracing::error!(recipe_id, error = %e, "failed to restore recipe");
            notifier.notify(Notification::error("Failed to restore recipe"));
        }
    }
    result
}

async fn fetch_original<C: HttpClient>(
    store: &dyn DocumentStore,
    mealdb: &MealDbClient<C>,
    user: &UserId,
    sanitizer: &RecipeSanitizer,
    recipe_id: &str,
) -> Result<Recipe, RecipeError> {
    store
        .delete(&user_collection(user, USER_RECIPES), recipe_id)
        .await?;
    tracing::info!(user = %user, recipe_id, "customization removed");

    match find_liked_recipe(store, user, sanitizer, recipe_id).await {
        Err(RecipeError::NotFound(_)) => {}
        other => return other,
    }

    tracing::debug!(recipe_id, "original not in favorites, asking mealdb");
    mealdb
        .recipe_by_id(recipe_id)
        .await?
        .ok_or_else(|| RecipeError::NotFound(recipe_id.to_string()))
}

/// The version of a recipe the user should see: their customization if one
/// exists and is valid, otherwise the liked record.
pub async fn resolve_recipe(
    store: &dyn DocumentStore,
    user: &UserId,
    sanitizer: &RecipeSanitizer,
    recipe_id: &str,
) -> Result<Recipe, RecipeError> {
    if let Some(data) = store
        .get(&user_collection(user, USER_RECIPES), recipe_id)
        .await?
    {
        let result = sanitizer.validate(recipe_id, &data);
        match result.sanitized_recipe {
            Some(recipe) if result.is_valid => return Ok(recipe),
            _ => tracing::warn!(recipe_id, "ignoring invalid customization"),
        }
    }

    find_liked_recipe(store, user, sanitizer, recipe_id).await
}

/// Create a new recipe from scratch and add it to the user's favorites.
pub async fn author_recipe(
    store: &dyn DocumentStore,
    user: &UserId,
    sanitizer: &RecipeSanitizer,
    draft: &RecipeDraft,
    now: DateTime<Utc>,
) -> Result<Recipe, RecipeError> {
    let id = uuid::Uuid::new_v4().to_string();

    let mut raw = draft_document(draft)?;
    if draft.str_meal_thumb.trim().is_empty() {
        raw.insert(
            "strMealThumb".to_string(),
            Value::String(DEFAULT_AUTHORED_THUMB.to_string()),
        );
    }
    raw.insert("likedAt".to_string(), Value::String(format_timestamp(now)));

    let recipe = accepted(sanitizer.validate_at(&id, &Value::Object(raw), now))?;

    let doc = recipe_document(&recipe, user)?;
    store
        .set(&user_collection(user, LIKED_RECIPES), &id, Value::Object(doc))
        .await?;
    tracing::info!(user = %user, recipe_id = %id, title = %recipe.str_meal, "recipe authored");
    Ok(recipe)
}
