//! Document store abstraction.
//!
//! Documents are untyped JSON values addressed by (collection, id). Per-user
//! data lives under `users/{uid}/...` collections, so a (user, recipe) pair is
//! the key of a like or a customization.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{RecipeError, StoreError};
use crate::session::UserId;
use crate::types::Recipe;

/// A stored document and its key.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Create or replace a document.
    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError>;

    /// Delete a document. Deleting a missing document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// All documents in a collection, ordered by id.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;
}

/// Collection path for one user's documents of the given kind.
pub fn user_collection(user: &UserId, name: &str) -> String {
    format!("users/{}/{}", user.as_str(), name)
}

/// Serialize a recipe into a document owned by `user`.
pub(crate) fn recipe_document(recipe: &Recipe, user: &UserId) -> Result<Map<String, Value>, RecipeError> {
    let mut doc = match serde_json::to_value(recipe) {
        Ok(Value::Object(doc)) => doc,
        Ok(_) => return Err(RecipeError::InvalidRecipe(recipe.id.clone())),
        Err(e) => return Err(RecipeError::InvalidRecipe(e.to_string())),
    };
    doc.insert("userId".to_string(), Value::String(user.as_str().to_string()));
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_collection() {
        let user = UserId::new("abc").unwrap();
        assert_eq!(user_collection(&user, "liked_recipes"), "users/abc/liked_recipes");
    }

    #[test]
    fn test_recipe_document_carries_owner() {
        let user = UserId::new("abc").unwrap();
        let recipe = Recipe {
            id: "1".to_string(),
            str_meal: "Soup".to_string(),
            ..Default::default()
        };

        let doc = recipe_document(&recipe, &user).unwrap();
        assert_eq!(doc["userId"], "abc");
        assert_eq!(doc["strMeal"], "Soup");
    }
}
