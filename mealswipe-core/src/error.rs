use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document {id} in {collection}: {message}")]
    InvalidDocument {
        collection: String,
        id: String,
        message: String,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the recipe services (likes, customization, authoring).
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("User must be signed in")]
    NotSignedIn,

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Invalid recipe data: {0}")]
    InvalidRecipe(String),

    #[error("Missing required fields: {}", missing_fields.join(", "))]
    Validation { missing_fields: Vec<String> },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Generation(#[from] LlmError),
}
