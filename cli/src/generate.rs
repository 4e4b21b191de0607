//! AI recipe generation.

use anyhow::{Context, Result};
use chrono::Utc;
use mealswipe_core::{
    correct_recipe_name, create_provider, generate_recipe, save_generated, GenerationConfig,
    GenerationRequest,
};

use crate::app::App;

pub async fn run(
    app: &App,
    name: &str,
    cuisine: Option<String>,
    dietary_preferences: Vec<String>,
    save: bool,
    correct_name: bool,
) -> Result<()> {
    // Fail before spending a request when the result can't be saved.
    let user = if save { Some(app.user()?) } else { None };

    let config = GenerationConfig::from_env().context("Failed to load AI configuration")?;
    let provider = create_provider(&config)?;

    let recipe_name = if correct_name {
        let corrected = correct_recipe_name(provider.as_ref(), name).await;
        if corrected != name {
            println!("Using corrected name: {}", corrected);
        }
        corrected
    } else {
        name.to_string()
    };

    let request = GenerationRequest {
        recipe_name,
        cuisine,
        dietary_preferences,
    };
    let recipe = generate_recipe(provider.as_ref(), &request).await?;

    println!("{} ({}, {})", recipe.str_meal, recipe.str_category, recipe.str_area);
    println!("{}", recipe.str_meal_thumb);
    println!("\nIngredients:");
    for (i, ingredient) in recipe.ingredients.iter().enumerate() {
        let measure = recipe.measures.get(i).map(String::as_str).unwrap_or("");
        println!("  - {} {}", measure, ingredient);
    }
    println!("\n{}", recipe.str_instructions);

    if let Some(user) = user {
        let id = save_generated(&app.store, &user, &recipe, Utc::now()).await?;
        println!("\n✓ Saved to favorites [{}]", id);
    }
    Ok(())
}
