//! Liking and unliking recipes.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::RecipeError;
use crate::notify::{Notification, Notifier};
use crate::sanitize::format_timestamp;
use crate::session::UserId;
use crate::store::{recipe_document, user_collection, DocumentStore};
use crate::types::{Recipe, LIKED_RECIPES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Added,
    Removed,
}

pub async fn is_liked(
    store: &dyn DocumentStore,
    user: &UserId,
    recipe_id: &str,
) -> Result<bool, RecipeError> {
    let collection = user_collection(user, LIKED_RECIPES);
    let liked = store.get(&collection, recipe_id).await?.is_some();
    tracing::debug!(user = %user, recipe_id, liked, "checked like status");
    Ok(liked)
}

/// Store `recipe` in the user's favorites, stamped with `likedAt = now`.
pub async fn add_like(
    store: &dyn DocumentStore,
    user: &UserId,
    recipe: &Recipe,
    now: DateTime<Utc>,
) -> Result<(), RecipeError> {
    let mut doc = recipe_document(recipe, user)?;
    doc.insert("likedAt".to_string(), Value::String(format_timestamp(now)));

    store
        .set(&user_collection(user, LIKED_RECIPES), &recipe.id, Value::Object(doc))
        .await?;
    tracing::info!(user = %user, recipe_id = %recipe.id, "like added");
    Ok(())
}

pub async fn remove_like(
    store: &dyn DocumentStore,
    user: &UserId,
    recipe_id: &str,
) -> Result<(), RecipeError> {
    store
        .delete(&user_collection(user, LIKED_RECIPES), recipe_id)
        .await?;
    tracing::info!(user = %user, recipe_id, "like removed");
    Ok(())
}

/// Flip the like status of `recipe` and tell the user what happened.
pub async fn toggle_like(
    store: &dyn DocumentStore,
    user: &UserId,
    recipe: &Recipe,
    notifier: &dyn Notifier,
    now: DateTime<Utc>,
) -> Result<LikeOutcome, RecipeError> {
    let result = async {
        if is_liked(store, user, &recipe.id).await? {
            remove_like(store, user, &recipe.id).await?;
            Ok::<_, RecipeError>(LikeOutcome::Removed)
        } else {
            add_like(store, user, recipe, now).await?;
            Ok(LikeOutcome::Added)
        }
    }
    .await;

    match &result {
        Ok(LikeOutcome::Added) => notifier.notify(Notification::success(format!(
            "Added \"{}\" to favorites",
            recipe.str_meal
        ))),
        Ok(LikeOutcome::Removed) => notifier.notify(Notification::success(format!(
            "Removed \"{}\" from favorites",
            recipe.str_meal
        ))),
        Err(e) => {
            tracing::error!(recipe_id = %recipe.id, error = %e, "failed to toggle like");
            notifier.notify(Notification::error("Failed to update favorites"));
        }
    }
    result
}

/// Like a recipe from the swipe deck. Recipes without a title, category,
/// instructions or thumbnail are not saved.
pub async fn like_swiped(
    store: &dyn DocumentStore,
    user: &UserId,
    recipe: &Recipe,
    now: DateTime<Utc>,
) -> Result<(), RecipeError> {
    let missing_fields: Vec<String> = [
        ("strMeal", &recipe.str_meal),
        ("strCategory", &recipe.str_category),
        ("strInstructions", &recipe.str_instructions),
        ("strMealThumb", &recipe.str_meal_thumb),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field.to_string())
    .collect();

    if !missing_fields.is_empty() {
        tracing::warn!(recipe_id = %recipe.id, ?missing_fields, "swiped recipe is incomplete");
        return Err(RecipeError::Validation { missing_fields });
    }

    add_like(store, user, recipe, now).await
}
