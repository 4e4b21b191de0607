//! Weekly meal plan and shopping list.

use anyhow::{anyhow, bail, Context, Result};
use mealswipe_core::load_liked_recipes;
use mealswipe_core::weekly::{day_index, WeeklyPlan};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

use crate::app::App;

pub async fn run(app: &App, seed: Option<u64>, swaps: &[String], output: Option<&Path>) -> Result<()> {
    let user = app.user()?;
    let liked = load_liked_recipes(&app.store, &user, &app.sanitizer).await?;
    if liked.recipes.is_empty() {
        bail!("Like some recipes first: the plan is built from your favorites");
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut plan = WeeklyPlan::generate(&liked.recipes, &mut rng);
    for day in swaps {
        let index = day_index(day).ok_or_else(|| anyhow!("Unknown day: {}", day))?;
        plan.swap(index, &liked.recipes, &mut rng)
            .with_context(|| format!("Cannot swap {}", day))?;
    }

    println!("Weekly Meal Plan\n");
    for meal in plan.meals() {
        println!("{:<10} {} [{}]", meal.day, meal.recipe.str_meal, meal.recipe.id);
    }

    let list = plan.shopping_list();
    match output {
        Some(path) => {
            fs::write(path, &list)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("\nShopping list written to {}", path.display());
        }
        None => print!("\n{}", list),
    }
    Ok(())
}
