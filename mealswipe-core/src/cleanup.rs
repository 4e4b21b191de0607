//! Repairing a user's favorites collection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::RecipeError;
use crate::sanitize::{format_timestamp, RecipeSanitizer};
use crate::session::UserId;
use crate::store::{recipe_document, user_collection, DocumentStore};
use crate::types::{Recipe, LIKED_RECIPES};

/// Ids of the documents each repair touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub deleted: Vec<String>,
    pub fixed: Vec<String>,
    pub failed: Vec<String>,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.deleted.len() + self.fixed.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

enum Repair {
    Fixed,
    Deleted,
}

async fn rewrite(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    user: &UserId,
    recipe: &Recipe,
    now: DateTime<Utc>,
) -> Result<(), RecipeError> {
    let mut data = recipe_document(recipe, user)?;
    data.insert("fixedAt".to_string(), Value::String(format_timestamp(now)));
    store.set(collection, id, Value::Object(data)).await?;
    Ok(())
}

/// Rewrite invalid favorites that can be salvaged and delete the rest.
///
/// Valid documents are left alone. A failure on one document is counted and
/// the sweep continues.
pub async fn cleanup_invalid_recipes(
    store: &dyn DocumentStore,
    user: &UserId,
    sanitizer: &RecipeSanitizer,
    now: DateTime<Utc>,
) -> Result<CleanupReport, RecipeError> {
    let collection = user_collection(user, LIKED_RECIPES);
    let documents = store.list(&collection).await?;
    let mut report = CleanupReport::default();

    for doc in documents {
        let result = sanitizer.validate_at(&doc.id, &doc.data, now);
        if result.is_valid {
            continue;
        }

        let outcome = match result.sanitized_recipe {
            Some(recipe) => rewrite(store, &collection, &doc.id, user, &recipe, now)
                .await
                .map(|()| Repair::Fixed),
            None => store
                .delete(&collection, &doc.id)
                .await
                .map(|()| Repair::Deleted)
                .map_err(RecipeError::from),
        };

        match outcome {
            Ok(Repair::Fixed) => report.fixed.push(doc.id),
            Ok(Repair::Deleted) => report.deleted.push(doc.id),
            Err(e) => {
                tracing::error!(doc_id = %doc.id, error = %e, "cleanup failed for document");
                report.failed.push(doc.id);
            }
        }
    }

    tracing::info!(
        user = %user,
        deleted = report.deleted.len(),
        fixed = report.fixed.len(),
        failed = report.failed.len(),
        "cleanup complete"
    );
    Ok(report)
}
