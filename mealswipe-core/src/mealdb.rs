//! Client for TheMealDB public recipe API.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::http::HttpClient;
use crate::types::Recipe;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// MealDB spreads ingredients over numbered columns, 1 through 20.
const MAX_INGREDIENTS: usize = 20;

#[derive(Debug, Deserialize)]
struct MealsResponse {
    meals: Option<Vec<Map<String, Value>>>,
}

pub struct MealDbClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> MealDbClient<C> {
    pub fn new(http: C) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: C, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Fetch one random recipe.
    pub async fn random_recipe(&self) -> Result<Recipe, FetchError> {
        let url = format!("{}/random.php", self.base_url);
        self.fetch_meals(&url)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::InvalidBody("random.php returned no meals".to_string()))
    }

    /// Search recipes by name. A blank term returns nothing without a request.
    pub async fn search_recipes(&self, term: &str) -> Result<Vec<Recipe>, FetchError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.endpoint("search.php", "s", term)?;
        self.fetch_meals(&url).await
    }

    /// Look up a recipe by MealDB id.
    pub async fn recipe_by_id(&self, id: &str) -> Result<Option<Recipe>, FetchError> {
        let url = self.endpoint("lookup.php", "i", id)?;
        Ok(self.fetch_meals(&url).await?.into_iter().next())
    }

    fn endpoint(&self, path: &str, key: &str, value: &str) -> Result<String, FetchError> {
        url::Url::parse_with_params(&format!("{}/{}", self.base_url, path), &[(key, value)])
            .map(String::from)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }

    async fn fetch_meals(&self, url: &str) -> Result<Vec<Recipe>, FetchError> {
        let body = self.http.fetch_text(url).await?;
        let response: MealsResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::InvalidBody(e.to_string()))?;

        let recipes: Vec<Recipe> = response
            .meals
            .unwrap_or_default()
            .iter()
            .map(transform_meal)
            .collect();
        tracing::debug!(url, count = recipes.len(), "mealdb: meals received");
        Ok(recipes)
    }
}

fn field<'a>(meal: &'a Map<String, Value>, key: &str) -> &'a str {
    meal.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Convert one MealDB meal object into a [`Recipe`].
///
/// Blank ingredient columns are skipped together with their measure, so the
/// two lists line up here. A blank measure is kept as `""`, which the
/// sanitizer drops when the record is read back.
pub fn transform_meal(meal: &Map<String, Value>) -> Recipe {
    let mut ingredients = Vec::new();
    let mut measures = Vec::new();
    for i in 1..=MAX_INGREDIENTS {
        let ingredient = field(meal, &format!("strIngredient{i}")).trim();
        if ingredient.is_empty() {
            continue;
        }
        ingredients.push(ingredient.to_string());
        measures.push(field(meal, &format!("strMeasure{i}")).trim().to_string());
    }

    let id = field(meal, "idMeal").to_string();
    let youtube = field(meal, "strYoutube").trim();

    Recipe {
        id: id.clone(),
        id_meal: id,
        str_meal: field(meal, "strMeal").to_string(),
        str_category: field(meal, "strCategory").to_string(),
        str_instructions: field(meal, "strInstructions").to_string(),
        str_meal_thumb: field(meal, "strMealThumb").to_string(),
        str_area: field(meal, "strArea").to_string(),
        str_social_media_link: (!youtube.is_empty()).then(|| youtube.to_string()),
        ingredients,
        measures,
        liked_at: None,
        is_customized: false,
    }
}
