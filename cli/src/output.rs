//! Terminal rendering.

use mealswipe_core::notify::{Level, Notification, Notifier};
use mealswipe_core::{Page, Recipe};

/// Prints notifications to the terminal.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => println!("✓ {}", notification.message),
            Level::Error => eprintln!("✗ {}: {}", notification.title, notification.message),
        }
    }
}

pub fn print_recipe(recipe: &Recipe) {
    println!("{} [{}]", recipe.str_meal, recipe.id);
    println!("{} · {}", recipe.str_category, recipe.str_area);
    if recipe.is_customized {
        println!("(your version)");
    }
    println!("{}", recipe.str_meal_thumb);
    if let Some(link) = &recipe.str_social_media_link {
        println!("{}", link);
    }

    if !recipe.ingredients.is_empty() {
        println!("\nIngredients:");
        for (i, ingredient) in recipe.ingredients.iter().enumerate() {
            match recipe.measures.get(i).filter(|m| !m.is_empty()) {
                Some(measure) => println!("  - {} {}", measure, ingredient),
                None => println!("  - {}", ingredient),
            }
        }
    }

    println!("\n{}", recipe.str_instructions);
}

pub fn print_recipe_line(recipe: &Recipe) {
    println!(
        "{:<12} {} ({}, {})",
        recipe.id, recipe.str_meal, recipe.str_category, recipe.str_area
    );
}

pub fn print_page(page: &Page<Recipe>) {
    for recipe in &page.items {
        print_recipe_line(recipe);
    }
    println!(
        "\n{}  (page {} of {})",
        page.summary(),
        page.page,
        page.total_pages
    );
}
