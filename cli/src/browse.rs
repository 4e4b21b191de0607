//! Browsing MealDB: random picks, search, single recipes, likes.

use anyhow::{bail, Result};
use chrono::Utc;
use mealswipe_core::{
    find_liked_recipe, is_liked, like_swiped, paginate, resolve_recipe, toggle_like, Recipe, RecipeError,
};

use crate::app::App;
use crate::output::{print_page, print_recipe, ConsoleNotifier};

pub async fn random(app: &App, like: bool) -> Result<()> {
    let recipe = app.mealdb.random_recipe().await?;
    print_recipe(&recipe);

    if like {
        let user = app.user()?;
        like_swiped(&app.store, &user, &recipe, Utc::now()).await?;
        println!("\n✓ Saved \"{}\" to favorites", recipe.str_meal);
    }
    Ok(())
}

pub async fn search(app: &App, term: &str, page: usize, per_page: usize) -> Result<()> {
    let results = app.mealdb.search_recipes(term).await?;
    if results.is_empty() {
        println!("No recipes found for \"{}\"", term.trim());
        return Ok(());
    }
    print_page(&paginate(results, page, per_page));
    Ok(())
}

pub async fn show(app: &App, id: &str) -> Result<()> {
    if let Ok(user) = app.user() {
        match resolve_recipe(&app.store, &user, &app.sanitizer, id).await {
            Ok(recipe) => {
                print_recipe(&recipe);
                return Ok(());
            }
            Err(RecipeError::NotFound(_)) => {}
            Err(e) => tracing::warn!(recipe_id = id, error = %e, "saved copy unreadable"),
        }
    }

    let recipe = lookup(app, id).await?;
    print_recipe(&recipe);
    Ok(())
}

pub async fn like(app: &App, id: &str) -> Result<()> {
    let user = app.user()?;
    // Unliking works for recipes MealDB doesn't know, such as authored ones.
    let recipe = if is_liked(&app.store, &user, id).await? {
        find_liked_recipe(&app.store, &user, &app.sanitizer, id)
            .await
            .unwrap_or_else(|_| Recipe {
                id: id.to_string(),
                str_meal: id.to_string(),
                ..Default::default()
            })
    } else {
        lookup(app, id).await?
    };
    toggle_like(&app.store, &user, &recipe, &ConsoleNotifier, Utc::now()).await?;
    Ok(())
}

async fn lookup(app: &App, id: &str) -> Result<Recipe> {
    match app.mealdb.recipe_by_id(id).await? {
        Some(recipe) => Ok(recipe),
        None => bail!("No recipe with id {}", id),
    }
}
