//! Offline check of a stored recipe document.

use anyhow::{Context, Result};
use mealswipe_core::AppConfig;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn run(file: &Path, id: Option<&str>) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let data: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let id = match id {
        Some(id) => id.to_string(),
        None => file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let sanitizer = AppConfig::from_env()?.sanitizer();
    let result = sanitizer.validate(&id, &data);
    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.is_valid {
        tracing::warn!(doc_id = %id, missing = %result.missing_fields.join(", "), "document is invalid");
    }
    Ok(())
}
