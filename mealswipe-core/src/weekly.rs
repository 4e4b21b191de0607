//! Weekly meal plan built from a user's favorites.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt::Write as _;
use thiserror::Error;

use crate::types::Recipe;

pub const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    #[error("No more unique recipes available to swap")]
    NoAlternatives,

    #[error("Day {index} is not in the plan ({len} days planned)")]
    DayOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMeal {
    pub day: &'static str,
    pub recipe: Recipe,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeeklyPlan {
    meals: Vec<PlannedMeal>,
}

impl WeeklyPlan {
    /// Shuffle `recipes` and assign up to seven of them to Monday onwards.
    pub fn generate<R: Rng + ?Sized>(recipes: &[Recipe], rng: &mut R) -> Self {
        let mut pool: Vec<&Recipe> = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            if !pool.iter().any(|r| r.id == recipe.id) {
                pool.push(recipe);
            }
        }
        pool.shuffle(rng);

        let meals = DAYS_OF_WEEK
            .into_iter()
            .zip(pool)
            .map(|(day, recipe)| PlannedMeal {
                day,
                recipe: recipe.clone(),
            })
            .collect();
        Self { meals }
    }

    pub fn meals(&self) -> &[PlannedMeal] {
        &self.meals
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.meals.iter().any(|m| m.recipe.id == recipe_id)
    }

    /// Replace the meal at `index` with a random recipe from `available` that
    /// isn't already planned.
    pub fn swap<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        available: &[Recipe],
        rng: &mut R,
    ) -> Result<&PlannedMeal, PlanError> {
        if index >= self.meals.len() {
            return Err(PlanError::DayOutOfRange {
                index,
                len: self.meals.len(),
            });
        }

        let candidates: Vec<&Recipe> = available
            .iter()
            .filter(|r| !self.contains(&r.id))
            .collect();
        let replacement = candidates
            .choose(rng)
            .ok_or(PlanError::NoAlternatives)?;

        let meal = &mut self.meals[index];
        tracing::debug!(
            day = meal.day,
            from = %meal.recipe.id,
            to = %replacement.id,
            "swapped planned meal"
        );
        meal.recipe = (*replacement).clone();
        Ok(meal)
    }

    /// Plain-text shopping list, one section per planned day.
    pub fn shopping_list(&self) -> String {
        let mut content = String::from("Weekly Meal Plan - Shopping List\n\n");
        for meal in &self.meals {
            let recipe = &meal.recipe;
            let _ = writeln!(content, "{} - {}", meal.day, recipe.str_meal);
            content.push_str(&"-".repeat(40));
            content.push('\n');
            for (i, ingredient) in recipe.ingredients.iter().enumerate() {
                if ingredient.trim().is_empty() {
                    continue;
                }
                let measure = recipe.measures.get(i).map(String::as_str).unwrap_or("");
                let _ = writeln!(content, "• {} {}", measure, ingredient);
            }
            content.push('\n');
        }
        content
    }
}

/// Parse a day name (any case) or a 1-based day number.
pub fn day_index(day: &str) -> Option<usize> {
    let day = day.trim();
    if let Ok(n) = day.parse::<usize>() {
        return (1..=DAYS_OF_WEEK.len()).contains(&n).then(|| n - 1);
    }
    DAYS_OF_WEEK
        .iter()
        .position(|d| d.eq_ignore_ascii_case(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            str_meal: format!("Meal {id}"),
            ..Default::default()
        }
    }

    fn recipes(n: usize) -> Vec<Recipe> {
        (1..=n).map(|i| recipe(&i.to_string())).collect()
    }

    #[test]
    fn test_generate_caps_at_seven_distinct_days() {
        let mut rng = StdRng::seed_from_u64(7);
        let plan = WeeklyPlan::generate(&recipes(12), &mut rng);

        assert_eq!(plan.len(), 7);
        let days: Vec<_> = plan.meals().iter().map(|m| m.day).collect();
        assert_eq!(days, DAYS_OF_WEEK);
        let ids: HashSet<_> = plan.meals().iter().map(|m| m.recipe.id.as_str()).collect();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_generate_with_few_recipes() {
        let mut rng = StdRng::seed_from_u64(1);
        let plan = WeeklyPlan::generate(&recipes(3), &mut rng);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.meals()[2].day, "Wednesday");

        let empty = WeeklyPlan::generate(&[], &mut rng);
        assert!(empty.is_empty());
        assert_eq!(empty.shopping_list(), "Weekly Meal Plan - Shopping List\n\n");
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let all = recipes(10);
        let a = WeeklyPlan::generate(&all, &mut StdRng::seed_from_u64(42));
        let b = WeeklyPlan::generate(&all, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_swap_picks_unplanned_recipe() {
        let all = recipes(8);
        let mut rng = StdRng::seed_from_u64(3);
        let mut plan = WeeklyPlan::generate(&all, &mut rng);
        let leftover = all.iter().find(|r| !plan.contains(&r.id)).unwrap().id.clone();
        let replaced = plan.meals()[2].recipe.id.clone();

        let swapped = plan.swap(2, &all, &mut rng).unwrap();
        assert_eq!(swapped.day, "Wednesday");
        assert_eq!(swapped.recipe.id, leftover);
        assert!(!plan.contains(&replaced));

        let swapped_back = plan.swap(0, &all, &mut rng).unwrap();
        assert_eq!(swapped_back.recipe.id, replaced);
    }

    #[test]
    fn test_swap_without_spare_recipes() {
        let all = recipes(7);
        let mut rng = StdRng::seed_from_u64(9);
        let mut plan = WeeklyPlan::generate(&all, &mut rng);

        assert_eq!(plan.swap(0, &all, &mut rng), Err(PlanError::NoAlternatives));
    }

    #[test]
    fn test_swap_rejects_unknown_day() {
        let all = recipes(3);
        let mut rng = StdRng::seed_from_u64(3);
        let mut plan = WeeklyPlan::generate(&all, &mut rng);

        assert_eq!(
            plan.swap(5, &all, &mut rng),
            Err(PlanError::DayOutOfRange { index: 5, len: 3 })
        );
    }

    #[test]
    fn test_shopping_list_format() {
        let mut soup = recipe("1");
        soup.str_meal = "Soup".to_string();
        soup.ingredients = vec!["Carrot".to_string(), " ".to_string(), "Salt".to_string()];
        soup.measures = vec!["2".to_string(), "1".to_string()];
        let plan = WeeklyPlan {
            meals: vec![PlannedMeal {
                day: "Monday",
                recipe: soup,
            }],
        };

        assert_eq!(
            plan.shopping_list(),
            "Weekly Meal Plan - Shopping List\n\n\
             Monday - Soup\n\
             ----------------------------------------\n\
             • 2 Carrot\n\
             •  Salt\n\
             \n"
        );
    }

    #[test]
    fn test_day_index() {
        assert_eq!(day_index("monday"), Some(0));
        assert_eq!(day_index("Sunday"), Some(6));
        assert_eq!(day_index("3"), Some(2));
        assert_eq!(day_index("0"), None);
        assert_eq!(day_index("8"), None);
        assert_eq!(day_index("Funday"), None);
    }
}
