//! Validation and sanitization of recipe documents.
//!
//! Documents come back from the store in whatever shape they were written:
//! older schema versions, half-finished edits, AI output. The sanitizer turns
//! any of them into a canonical [`Recipe`] plus a validity verdict. It never
//! fails; problems are reported through [`ValidationResult::missing_fields`].
//!
//! Validity only looks at the raw input: a document missing its title is
//! invalid even though the sanitized copy carries "Untitled Recipe".

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::types::{Recipe, ValidationResult};

/// Fields that must be present (and truthy) in the raw document.
pub const REQUIRED_FIELDS: [&str; 3] = ["strMeal", "strCategory", "strInstructions"];

/// Marker reported when the document is not a JSON object.
pub const INVALID_DATA_FORMAT: &str = "Invalid data format";

/// Marker reported when a field has a type that cannot be normalized.
pub const DATA_PARSING_ERROR: &str = "Data parsing error";

/// Local fallback image used whenever a thumbnail URL is rejected.
pub const PLACEHOLDER_IMAGE: &str = "/recipe-placeholder.jpg";

pub const DEFAULT_TITLE: &str = "Untitled Recipe";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_INSTRUCTIONS: &str = "No instructions available";
pub const DEFAULT_AREA: &str = "Unknown";

/// Hosts recipe thumbnails may be served from. Subdomains are accepted too.
pub const DEFAULT_IMAGE_DOMAINS: &[&str] = &[
    "www.themealdb.com",
    "images.unsplash.com",
    "placehold.co",
    "lh3.googleusercontent.com",
    "downshiftology.com",
];

/// Extensions accepted on a thumbnail path or query-parameter value.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

#[derive(Debug, Error)]
#[error("unexpected type for field {field}")]
struct TypeMismatch {
    field: &'static str,
}

/// Allow-list policy for thumbnail URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePolicy {
    allowed_domains: Vec<String>,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_DOMAINS.iter().copied())
    }
}

impl ImagePolicy {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { allowed_domains }
    }

    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// True when `host` is an allowed domain or a subdomain of one.
    pub fn is_allowed_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.allowed_domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Return `url` if it is an acceptable thumbnail, else [`PLACEHOLDER_IMAGE`].
    pub fn sanitize_url(&self, url: &str) -> String {
        let url = url.trim();
        if url.is_empty() || !url.to_ascii_lowercase().starts_with("http") {
            return PLACEHOLDER_IMAGE.to_string();
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return PLACEHOLDER_IMAGE.to_string(),
        };

        if !matches!(parsed.scheme(), "http" | "https") {
            return PLACEHOLDER_IMAGE.to_string();
        }

        let allowed = parsed
            .host_str()
            .is_some_and(|host| self.is_allowed_host(host));
        if !allowed {
            return PLACEHOLDER_IMAGE.to_string();
        }

        if has_image_extension(parsed.path()) {
            return url.to_string();
        }

        // CDN-style URLs carry the real file name in a query parameter.
        let has_query = parsed.query().is_some_and(|q| !q.is_empty());
        if has_query && parsed.query_pairs().any(|(_, v)| has_image_extension(&v)) {
            return url.to_string();
        }

        PLACEHOLDER_IMAGE.to_string()
    }
}

/// Case-insensitive check for a known image extension at the end of `s`.
pub fn has_image_extension(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Normalizes raw recipe documents.
#[derive(Debug, Clone, Default)]
pub struct RecipeSanitizer {
    images: ImagePolicy,
}

impl RecipeSanitizer {
    pub fn new(images: ImagePolicy) -> Self {
        Self { images }
    }

    pub fn image_policy(&self) -> &ImagePolicy {
        &self.images
    }

    /// Validate and sanitize using the current time for missing timestamps.
    pub fn validate(&self, doc_id: &str, data: &Value) -> ValidationResult {
        self.validate_at(doc_id, data, Utc::now())
    }

    /// Validate and sanitize, substituting `now` for missing or unparseable `likedAt`.
    pub fn validate_at(&self, doc_id: &str, data: &Value, now: DateTime<Utc>) -> ValidationResult {
        let Some(fields) = data.as_object() else {
            tracing::debug!(doc_id, "recipe document is not an object");
            return ValidationResult::rejected(INVALID_DATA_FORMAT);
        };

        let missing_fields: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !is_truthy(fields.get(**field)))
            .map(|field| field.to_string())
            .collect();

        match self.sanitize(doc_id, fields, now) {
            Ok(recipe) => ValidationResult {
                is_valid: missing_fields.is_empty(),
                missing_fields,
                sanitized_recipe: Some(recipe),
            },
            Err(e) => {
                tracing::debug!(doc_id, error = %e, "recipe document failed to parse");
                ValidationResult::rejected(DATA_PARSING_ERROR)
            }
        }
    }

    fn sanitize(
        &self,
        doc_id: &str,
        fields: &Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<Recipe, TypeMismatch> {
        Ok(Recipe {
            id: doc_id.to_string(),
            id_meal: doc_id.to_string(),
            str_meal: text_field(fields, "strMeal", DEFAULT_TITLE)?,
            str_category: text_field(fields, "strCategory", DEFAULT_CATEGORY)?,
            str_instructions: text_field(fields, "strInstructions", DEFAULT_INSTRUCTIONS)?,
            str_meal_thumb: self.image_field(fields)?,
            str_area: text_field(fields, "strArea", DEFAULT_AREA)?,
            str_social_media_link: optional_text(fields, "strSocialMediaLink"),
            ingredients: string_list(fields, "ingredients")?,
            measures: string_list(fields, "measures")?,
            liked_at: Some(format_timestamp(
                parse_timestamp(fields.get("likedAt")).unwrap_or(now),
            )),
            is_customized: is_truthy(fields.get("isCustomized")),
        })
    }

    fn image_field(&self, fields: &Map<String, Value>) -> Result<String, TypeMismatch> {
        let value = fields.get("strMealThumb");
        if !is_truthy(value) {
            return Ok(PLACEHOLDER_IMAGE.to_string());
        }
        match value {
            Some(Value::String(url)) => Ok(self.images.sanitize_url(url)),
            _ => Err(TypeMismatch {
                field: "strMealThumb",
            }),
        }
    }
}

/// Validate and sanitize with the default image policy and the current time.
pub fn validate_and_sanitize_recipe(doc_id: &str, data: &Value) -> ValidationResult {
    RecipeSanitizer::default().validate(doc_id, data)
}

/// Like [`validate_and_sanitize_recipe`] with an explicit "now".
pub fn validate_and_sanitize_recipe_at(
    doc_id: &str,
    data: &Value,
    now: DateTime<Utc>,
) -> ValidationResult {
    RecipeSanitizer::default().validate_at(doc_id, data, now)
}

/// JavaScript-style truthiness, which is what stored documents were written against.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn text_field(
    fields: &Map<String, Value>,
    field: &'static str,
    default: &str,
) -> Result<String, TypeMismatch> {
    let value = fields.get(field);
    if !is_truthy(value) {
        return Ok(default.to_string());
    }
    match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok(if trimmed.is_empty() { default } else { trimmed }.to_string())
        }
        _ => Err(TypeMismatch { field }),
    }
}

fn optional_text(fields: &Map<String, Value>, field: &str) -> Option<String> {
    match fields.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn string_list(fields: &Map<String, Value>, field: &'static str) -> Result<Vec<String>, TypeMismatch> {
    let Some(Value::Array(items)) = fields.get(field) else {
        return Ok(Vec::new());
    };

    // Entries left blank by trimming are dropped too.
    items
        .iter()
        .filter(|item| is_truthy(Some(*item)))
        .filter_map(|item| match item {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| Ok(trimmed.to_string()))
            }
            _ => Some(Err(TypeMismatch { field })),
        })
        .collect()
}

/// Parse a stored timestamp. Strings are tried as RFC 3339, RFC 2822, naive
/// date-times (taken as UTC) and plain dates; numbers are epoch milliseconds.
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
