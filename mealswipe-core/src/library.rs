//! Reading a user's saved recipes.
//!
//! Every read goes through the sanitizer; documents that fail validation are
//! skipped and reported rather than shown.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashSet;

use crate::error::RecipeError;
use crate::sanitize::{parse_timestamp, RecipeSanitizer};
use crate::session::UserId;
use crate::store::{user_collection, DocumentStore};
use crate::types::{Recipe, LIKED_RECIPES};

/// Sanitized favorites plus the ids of documents that were rejected.
#[derive(Debug, Clone, Default)]
pub struct LikedRecipes {
    /// Newest like first.
    pub recipes: Vec<Recipe>,
    pub invalid_ids: Vec<String>,
}

pub async fn load_liked_recipes(
    store: &dyn DocumentStore,
    user: &UserId,
    sanitizer: &RecipeSanitizer,
) -> Result<LikedRecipes, RecipeError> {
    let documents = store.list(&user_collection(user, LIKED_RECIPES)).await?;

    let mut seen = HashSet::new();
    let mut liked = LikedRecipes::default();
    for doc in documents {
        let result = sanitizer.validate(&doc.id, &doc.data);
        match result.sanitized_recipe {
            Some(recipe) if result.is_valid => {
                if seen.insert(recipe.id.clone()) {
                    liked.recipes.push(recipe);
                }
            }
            _ => {
                tracing::error!(
                    doc_id = %doc.id,
                    missing = %result.missing_fields.join(", "),
                    "recipe document is invalid"
                );
                liked.invalid_ids.push(doc.id);
            }
        }
    }

    if !liked.invalid_ids.is_empty() {
        tracing::warn!(count = liked.invalid_ids.len(), "found invalid recipe documents");
    }

    sort_newest_first(&mut liked.recipes);
    Ok(liked)
}

/// Order by `likedAt`, newest first, comparing instants rather than strings.
/// Recipes without a readable timestamp go last.
pub fn sort_newest_first(recipes: &mut [Recipe]) {
    recipes.sort_by_cached_key(|recipe| Reverse(liked_at(recipe)));
}

fn liked_at(recipe: &Recipe) -> Option<DateTime<Utc>> {
    recipe
        .liked_at
        .as_deref()
        .and_then(|t| parse_timestamp(Some(&serde_json::Value::from(t))))
}

/// Read one favorite. Missing documents are `NotFound`, unusable ones
/// `InvalidRecipe`.
pub async fn find_liked_recipe(
    store: &dyn DocumentStore,
    user: &UserId,
    sanitizer: &RecipeSanitizer,
    recipe_id: &str,
) -> Result<Recipe, RecipeError> {
    let data = store
        .get(&user_collection(user, LIKED_RECIPES), recipe_id)
        .await?
        .ok_or_else(|| RecipeError::NotFound(recipe_id.to_string()))?;

    let result = sanitizer.validate(recipe_id, &data);
    match result.sanitized_recipe {
        Some(recipe) if result.is_valid => Ok(recipe),
        _ => Err(RecipeError::InvalidRecipe(format!(
            "{}: {}",
            recipe_id,
            result.missing_fields.join(", ")
        ))),
    }
}

/// Summary shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub total_recipes: usize,
    /// Most frequent category; ties go to the category seen first.
    pub favorite_category: Option<String>,
    pub last_added: Option<DateTime<Utc>>,
}

pub fn profile_stats(recipes: &[Recipe]) -> ProfileStats {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for recipe in recipes {
        match counts.iter_mut().find(|(c, _)| *c == recipe.str_category) {
            Some((_, n)) => *n += 1,
            None => counts.push((&recipe.str_category, 1)),
        }
    }

    let mut favorite: Option<(&str, usize)> = None;
    for (category, count) in counts {
        if favorite.map_or(true, |(_, best)| count > best) {
            favorite = Some((category, count));
        }
    }

    let last_added = recipes.iter().filter_map(liked_at).max();

    ProfileStats {
        total_recipes: recipes.len(),
        favorite_category: favorite.map(|(category, _)| category.to_string()),
        last_added,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn doc(title: &str, category: &str, liked_at: &str) -> serde_json::Value {
        json!({
            "strMeal": title,
            "strCategory": category,
            "strInstructions": "Cook.",
            "likedAt": liked_at,
        })
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        let collection = "users/u1/liked_recipes";
        store
            .set(collection, "a", doc("Apple Pie", "Dessert", "2024-01-01T00:00:00.000Z"))
            .await
            .unwrap();
        store
            .set(collection, "b", doc("Beef Stew", "Beef", "2024-03-01T00:00:00.000Z"))
            .await
            .unwrap();
        store
            .set(collection, "c", json!({"strMeal": "No category"}))
            .await
            .unwrap();
        store.set(collection, "d", json!("garbage")).await.unwrap();
        store
            .set(collection, "e", doc("Eton Mess", "Dessert", "2024-02-01T00:00:00.000Z"))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_load_skips_invalid_and_orders_newest_first() {
        let store = seeded_store().await;

        let liked = load_liked_recipes(&store, &user(), &RecipeSanitizer::default())
            .await
            .unwrap();

        let titles: Vec<_> = liked.recipes.iter().map(|r| r.str_meal.as_str()).collect();
        assert_eq!(titles, vec!["Beef Stew", "Eton Mess", "Apple Pie"]);
        assert_eq!(liked.invalid_ids, vec!["c", "d"]);
    }

    #[tokio::test]
    async fn test_load_for_user_without_likes() {
        let store = MemoryStore::new();
        let liked = load_liked_recipes(&store, &user(), &RecipeSanitizer::default())
            .await
            .unwrap();
        assert!(liked.recipes.is_empty());
        assert!(liked.invalid_ids.is_empty());
    }

    #[tokio::test]
    async fn test_find_liked_recipe() {
        let store = seeded_store().await;
        let sanitizer = RecipeSanitizer::default();

        let found = find_liked_recipe(&store, &user(), &sanitizer, "b").await.unwrap();
        assert_eq!(found.str_meal, "Beef Stew");

        assert!(matches!(
            find_liked_recipe(&store, &user(), &sanitizer, "zzz").await,
            Err(RecipeError::NotFound(_))
        ));
        assert!(matches!(
            find_liked_recipe(&store, &user(), &sanitizer, "c").await,
            Err(RecipeError::InvalidRecipe(_))
        ));
    }

    #[tokio::test]
    async fn test_profile_stats() {
        let store = seeded_store().await;
        let liked = load_liked_recipes(&store, &user(), &RecipeSanitizer::default())
            .await
            .unwrap();

        let stats = profile_stats(&liked.recipes);
        assert_eq!(stats.total_recipes, 3);
        assert_eq!(stats.favorite_category.as_deref(), Some("Dessert"));
        assert_eq!(
            stats.last_added,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_newest_first_compares_instants() {
        let recipe = |id: &str, liked_at: Option<&str>| Recipe {
            id: id.to_string(),
            liked_at: liked_at.map(str::to_string),
            ..Default::default()
        };
        // As strings "+02:00" sorts after "Z"; as instants it is earlier.
        let mut recipes = vec![
            recipe("none", None),
            recipe("offset", Some("2024-03-01T00:00:00+02:00")),
            recipe("utc", Some("2024-02-29T23:30:00.000Z")),
        ];

        sort_newest_first(&mut recipes);
        let ids: Vec<_> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["utc", "offset", "none"]);

        assert_eq!(
            profile_stats(&recipes).last_added,
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 23, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_profile_stats_tie_goes_to_first_category() {
        let recipe = |category: &str| Recipe {
            str_category: category.to_string(),
            ..Default::default()
        };
        let stats = profile_stats(&[recipe("Pasta"), recipe("Beef"), recipe("Beef"), recipe("Pasta")]);
        assert_eq!(stats.favorite_category.as_deref(), Some("Pasta"));

        let empty = profile_stats(&[]);
        assert_eq!(empty.total_recipes, 0);
        assert_eq!(empty.favorite_category, None);
        assert_eq!(empty.last_added, None);
    }
}
