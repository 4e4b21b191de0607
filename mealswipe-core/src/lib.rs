pub mod cleanup;
pub mod config;
pub mod customize;
pub mod error;
pub mod generate;
pub mod http;
pub mod library;
pub mod likes;
pub mod llm;
pub mod mealdb;
pub mod notify;
pub mod pagination;
pub mod sanitize;
pub mod session;
pub mod store;
pub mod types;
pub mod weekly;

pub use cleanup::{cleanup_invalid_recipes, CleanupReport};
pub use config::{AppConfig, ConfigError, GenerationConfig, ProviderKind};
pub use customize::{author_recipe, resolve_recipe, restore_original, save_customization};
pub use error::{FetchError, RecipeError, StoreError};
pub use generate::{
    correct_recipe_name, generate_recipe, save_generated, GeneratedRecipe, GenerationRequest,
};
pub use http::{HttpClient, MockClient, MockResponse, ReqwestClient};
pub use library::{
    find_liked_recipe, load_liked_recipes, profile_stats, sort_newest_first, LikedRecipes,
    ProfileStats,
};
pub use likes::{add_like, is_liked, like_swiped, remove_like, toggle_like, LikeOutcome};
pub use llm::{create_provider, FakeProvider, GeminiProvider, LlmError, LlmProvider};
pub use mealdb::MealDbClient;
pub use notify::{Notification, Notifier, TracingNotifier};
pub use pagination::{paginate, Page};
pub use sanitize::{
    validate_and_sanitize_recipe, validate_and_sanitize_recipe_at, ImagePolicy, RecipeSanitizer,
};
pub use session::UserId;
pub use store::{DocumentStore, FileStore, MemoryStore};
pub use types::{Recipe, RecipeDraft, ValidationResult};
pub use weekly::{PlanError, WeeklyPlan};
