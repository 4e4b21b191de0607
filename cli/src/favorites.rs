//! Commands over the signed-in user's saved recipes.

use anyhow::{Context, Result};
use chrono::Utc;
use mealswipe_core::{
    author_recipe, cleanup_invalid_recipes, load_liked_recipes, paginate, profile_stats,
    resolve_recipe, restore_original, save_customization, RecipeDraft,
};

use crate::app::App;
use crate::output::{print_page, print_recipe, ConsoleNotifier};
use crate::RecipeFields;

pub async fn liked(app: &App, page: usize, per_page: usize) -> Result<()> {
    let user = app.user()?;
    let liked = load_liked_recipes(&app.store, &user, &app.sanitizer).await?;

    if !liked.invalid_ids.is_empty() {
        eprintln!(
            "{} saved recipe(s) could not be read; run `mealswipe cleanup` to repair them",
            liked.invalid_ids.len()
        );
    }
    if liked.recipes.is_empty() {
        println!("No favorites yet");
        return Ok(());
    }
    print_page(&paginate(liked.recipes, page, per_page));
    Ok(())
}

pub async fn profile(app: &App) -> Result<()> {
    let user = app.user()?;
    let liked = load_liked_recipes(&app.store, &user, &app.sanitizer).await?;
    let stats = profile_stats(&liked.recipes);

    println!("User:              {}", user);
    println!("Saved recipes:     {}", stats.total_recipes);
    println!(
        "Favorite category: {}",
        stats.favorite_category.as_deref().unwrap_or("-")
    );
    println!(
        "Last added:        {}",
        stats
            .last_added
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    Ok(())
}

pub async fn cleanup(app: &App) -> Result<()> {
    let user = app.user()?;
    let report = cleanup_invalid_recipes(&app.store, &user, &app.sanitizer, Utc::now()).await?;
    if report.is_empty() {
        println!("Nothing to clean up");
        return Ok(());
    }
    println!(
        "Fixed {}, deleted {}, failed {}",
        report.fixed.len(),
        report.deleted.len(),
        report.failed.len()
    );
    for (label, ids) in [
        ("fixed", &report.fixed),
        ("deleted", &report.deleted),
        ("failed", &report.failed),
    ] {
        for id in ids {
            println!("  {:<8} {}", label, id);
        }
    }
    Ok(())
}

pub async fn edit(app: &App, id: &str, fields: RecipeFields) -> Result<()> {
    let user = app.user()?;
    let original = resolve_recipe(&app.store, &user, &app.sanitizer, id)
        .await
        .with_context(|| format!("Recipe {} is not in your favorites", id))?;

    let draft = apply_fields(RecipeDraft::from(&original), fields);
    let saved = save_customization(
        &app.store,
        &user,
        &app.sanitizer,
        &original,
        &draft,
        &ConsoleNotifier,
        Utc::now(),
    )
    .await?;
    println!();
    print_recipe(&saved);
    Ok(())
}

pub async fn restore(app: &App, id: &str) -> Result<()> {
    let user = app.user()?;
    let original =
        restore_original(&app.store, &app.mealdb, &user, &app.sanitizer, id, &ConsoleNotifier)
            .await?;
    println!();
    print_recipe(&original);
    Ok(())
}

pub async fn add(app: &App, fields: RecipeFields) -> Result<()> {
    let user = app.user()?;
    let draft = apply_fields(RecipeDraft::default(), fields);
    let recipe = author_recipe(&app.store, &user, &app.sanitizer, &draft, Utc::now()).await?;
    println!("✓ Added \"{}\" [{}]", recipe.str_meal, recipe.id);
    Ok(())
}

/// Overlay the fields given on the command line. Any `--ingredient` replaces
/// the whole ingredient list.
fn apply_fields(mut draft: RecipeDraft, fields: RecipeFields) -> RecipeDraft {
    if let Some(title) = fields.title {
        draft.str_meal = title;
    }
    if let Some(category) = fields.category {
        draft.str_category = category;
    }
    if let Some(instructions) = fields.instructions {
        draft.str_instructions = instructions;
    }
    if let Some(area) = fields.area {
        draft.str_area = area;
    }
    if let Some(thumb) = fields.thumb {
        draft.str_meal_thumb = thumb;
    }
    if !fields.ingredients.is_empty() {
        let (ingredients, measures): (Vec<String>, Vec<String>) =
            fields.ingredients.iter().map(|arg| parse_ingredient(arg)).unzip();
        draft.ingredients = ingredients;
        draft.measures = measures;
    }
    draft
}

/// Split "name=measure" into its parts; the measure may be omitted.
fn parse_ingredient(arg: &str) -> (String, String) {
    match arg.split_once('=') {
        Some((name, measure)) => (name.trim().to_string(), measure.trim().to_string()),
        None => (arg.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient() {
        assert_eq!(
            parse_ingredient("flour = 2 cups"),
            ("flour".to_string(), "2 cups".to_string())
        );
        assert_eq!(parse_ingredient("salt"), ("salt".to_string(), String::new()));
    }

    #[test]
    fn test_apply_fields_overlays_only_given_values() {
        let draft = RecipeDraft {
            str_meal: "Soup".to_string(),
            str_category: "Starter".to_string(),
            ingredients: vec!["leek".to_string()],
            measures: vec!["1".to_string()],
            ..Default::default()
        };
        let fields = RecipeFields {
            title: Some("Leek Soup".to_string()),
            ..Default::default()
        };

        let updated = apply_fields(draft, fields);
        assert_eq!(updated.str_meal, "Leek Soup");
        assert_eq!(updated.str_category, "Starter");
        assert_eq!(updated.ingredients, vec!["leek"]);

        let replaced = apply_fields(
            updated,
            RecipeFields {
                ingredients: vec!["potato=2".to_string(), "cream".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(replaced.ingredients, vec!["potato", "cream"]);
        assert_eq!(replaced.measures, vec!["2", ""]);
    }

    // `--ingredient cream` stores an empty measure, and reading the record back
    // drops it, leaving one measure for two ingredients.
    #[test]
    fn test_ingredient_without_measure_misaligns_on_reload() {
        let draft = apply_fields(
            RecipeDraft {
                str_meal: "Mash".to_string(),
                str_category: "Side".to_string(),
                str_instructions: "Boil and mash.".to_string(),
                ..Default::default()
            },
            RecipeFields {
                ingredients: vec!["cream".to_string(), "potato=1kg".to_string()],
                ..Default::default()
            },
        );

        let stored = serde_json::to_value(&draft).unwrap();
        let recipe = mealswipe_core::validate_and_sanitize_recipe("mash", &stored)
            .sanitized_recipe
            .unwrap();
        assert_eq!(recipe.ingredients, vec!["cream", "potato"]);
        assert_eq!(recipe.measures, vec!["1kg"]);
    }
}
