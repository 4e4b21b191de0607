//! Directory-backed document store: one pretty-printed JSON file per document.

use async_trait::async_trait;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Document, DocumentStore};
use crate::error::StoreError;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default store directory: ~/.mealswipe/store
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".mealswipe").join("store"))
            .unwrap_or_else(|| PathBuf::from("data/store"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        collection
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |dir, segment| {
                dir.join(encode_segment(segment))
            })
    }

    fn document_path(&self, collection: &str, id: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.json", encode_segment(id)))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let path = self.document_path(collection, id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::InvalidDocument {
                collection: collection.to_string(),
                id: id.to_string(),
                message: e.to_string(),
            })
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError> {
        let path = self.document_path(collection, id);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(&data).map_err(|e| {
            StoreError::InvalidDocument {
                collection: collection.to_string(),
                id: id.to_string(),
                message: e.to_string(),
            }
        })?;

        // Write-then-rename so readers never see a half-written document.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(collection, id, "store: document written");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.document_path(collection, id)) {
            Ok(()) => {
                tracing::debug!(collection, id, "store: document deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let dir = self.collection_dir(collection);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
            .collect();

        let mut documents = Vec::new();
        for path in paths {
            let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_segment)
            else {
                tracing::warn!(path = %path.display(), "store: skipping unrecognized file");
                continue;
            };

            if let Some(data) = self.get(collection, &id).await? {
                documents.push(Document { id, data });
            }
        }

        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(documents)
    }
}

/// Filesystem-safe, reversible encoding of a path segment. Anything outside
/// `[A-Za-z0-9_-]` becomes `~XX` (hex byte).
fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("~{:02X}", byte));
        }
    }
    encoded
}

fn decode_segment(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'~' {
            let hex = encoded.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}
