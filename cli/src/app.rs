//! Shared command context.

use anyhow::{Context, Result};
use mealswipe_core::{AppConfig, FileStore, MealDbClient, RecipeSanitizer, ReqwestClient, UserId};
use std::path::PathBuf;

pub struct App {
    pub config: AppConfig,
    pub store: FileStore,
    pub sanitizer: RecipeSanitizer,
    pub mealdb: MealDbClient<ReqwestClient>,
}

impl App {
    /// Build the context from the environment. Command-line values win over
    /// their environment counterparts.
    pub fn from_env(user: Option<String>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = AppConfig::from_env().context("Failed to load configuration")?;
        if user.is_some() {
            config.user = user;
        }
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }

        let http = ReqwestClient::builder()
            .rate_limit_ms(config.rate_limit_ms)
            .build()
            .context("Failed to build HTTP client")?;

        tracing::debug!(data_dir = %config.data_dir.display(), "using document store");
        Ok(Self {
            store: FileStore::new(config.data_dir.clone()),
            sanitizer: config.sanitizer(),
            mealdb: MealDbClient::with_base_url(http, &config.mealdb_url),
            config,
        })
    }

    /// The signed-in user. Commands touching favorites need one.
    pub fn user(&self) -> Result<UserId> {
        self.config
            .require_user()
            .context("Set MEALSWIPE_USER or pass --user")
    }
}
