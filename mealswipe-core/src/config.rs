//! Configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::error::RecipeError;
use crate::llm::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::mealdb;
use crate::sanitize::{ImagePolicy, RecipeSanitizer, DEFAULT_IMAGE_DOMAINS};
use crate::session::UserId;
use crate::store::FileStore;

/// Default delay between requests to the same host, in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 200;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of the document store.
    pub data_dir: PathBuf,
    /// Signed-in user, if any.
    pub user: Option<String>,
    pub mealdb_url: String,
    pub rate_limit_ms: u64,
    /// Hosts recipe thumbnails may be served from.
    pub image_domains: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: FileStore::default_dir(),
            user: None,
            mealdb_url: mealdb::DEFAULT_BASE_URL.to_string(),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            image_domains: DEFAULT_IMAGE_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `MEALSWIPE_DATA_DIR`: store directory (default: "~/.mealswipe/store")
    /// - `MEALSWIPE_USER`: signed-in user id
    /// - `MEALSWIPE_MEALDB_URL`: MealDB API base URL
    /// - `MEALSWIPE_HTTP_RATE_LIMIT_MS`: per-host delay in ms (default: 200)
    /// - `MEALSWIPE_IMAGE_DOMAINS`: comma-separated image host allow-list
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration using `lookup` in place of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = non_empty(lookup("MEALSWIPE_DATA_DIR")) {
            config.data_dir = PathBuf::from(dir);
        }
        config.user = non_empty(lookup("MEALSWIPE_USER"));
        if let Some(url) = non_empty(lookup("MEALSWIPE_MEALDB_URL")) {
            config.mealdb_url = url;
        }
        if let Some(ms) = non_empty(lookup("MEALSWIPE_HTTP_RATE_LIMIT_MS")) {
            config.rate_limit_ms = parse_var("MEALSWIPE_HTTP_RATE_LIMIT_MS", &ms)?;
        }
        if let Some(domains) = non_empty(lookup("MEALSWIPE_IMAGE_DOMAINS")) {
            config.image_domains = domains
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }

    pub fn sanitizer(&self) -> RecipeSanitizer {
        RecipeSanitizer::new(ImagePolicy::new(&self.image_domains))
    }

    /// The configured user, or `NotSignedIn`.
    pub fn require_user(&self) -> Result<UserId, RecipeError> {
        UserId::require(self.user.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Fake,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "fake" => Ok(Self::Fake),
            _ => Err(ConfigError::InvalidValue {
                var: "MEALSWIPE_AI_PROVIDER".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Recipe generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub provider: ProviderKind,
    /// Required by the Gemini provider.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GenerationConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `MEALSWIPE_AI_PROVIDER`: "gemini" | "fake" (default: "gemini")
    /// - `GEMINI_API_KEY`: API key, required when the provider is gemini
    /// - `MEALSWIPE_AI_MODEL`: model name (default: "gemini-1.5-flash-latest")
    /// - `MEALSWIPE_AI_BASE_URL`: API base URL
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let provider = match non_empty(lookup("MEALSWIPE_AI_PROVIDER")) {
            Some(name) => name.parse()?,
            None => ProviderKind::Gemini,
        };

        Ok(Self {
            provider,
            api_key: non_empty(lookup("GEMINI_API_KEY")),
            model: non_empty(lookup("MEALSWIPE_AI_MODEL"))
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: non_empty(lookup("MEALSWIPE_AI_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.rate_limit_ms, 200);
        assert_eq!(config.image_domains.len(), DEFAULT_IMAGE_DOMAINS.len());
        assert!(matches!(config.require_user(), Err(RecipeError::NotSignedIn)));
    }

    #[test]
    fn test_app_config_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MEALSWIPE_DATA_DIR", "/tmp/meals"),
            ("MEALSWIPE_USER", "alice"),
            ("MEALSWIPE_MEALDB_URL", "http://localhost:9000/api"),
            ("MEALSWIPE_HTTP_RATE_LIMIT_MS", "0"),
            ("MEALSWIPE_IMAGE_DOMAINS", "Example.com, , cdn.food.net"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/meals"));
        assert_eq!(config.require_user().unwrap().as_str(), "alice");
        assert_eq!(config.mealdb_url, "http://localhost:9000/api");
        assert_eq!(config.rate_limit_ms, 0);
        assert_eq!(config.image_domains, vec!["Example.com", "cdn.food.net"]);
        assert!(config
            .sanitizer()
            .image_policy()
            .is_allowed_host("img.example.com"));
    }

    #[test]
    fn test_app_config_rejects_bad_rate_limit() {
        let err = AppConfig::from_lookup(lookup(&[("MEALSWIPE_HTTP_RATE_LIMIT_MS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: "MEALSWIPE_HTTP_RATE_LIMIT_MS".to_string(),
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn test_generation_config() {
        let defaults = GenerationConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(defaults.provider, ProviderKind::Gemini);
        assert_eq!(defaults.api_key, None);
        assert_eq!(defaults.model, DEFAULT_GEMINI_MODEL);

        let fake = GenerationConfig::from_lookup(lookup(&[
            ("MEALSWIPE_AI_PROVIDER", "FAKE"),
            ("GEMINI_API_KEY", "k"),
            ("MEALSWIPE_AI_MODEL", "gemini-pro"),
        ]))
        .unwrap();
        assert_eq!(fake.provider, ProviderKind::Fake);
        assert_eq!(fake.api_key.as_deref(), Some("k"));
        assert_eq!(fake.model, "gemini-pro");

        assert!(GenerationConfig::from_lookup(lookup(&[("MEALSWIPE_AI_PROVIDER", "openai")])).is_err());
    }
}
