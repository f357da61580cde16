//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use babel_infra::{DatabaseConfig, OpenAiConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs on the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// `None` disables translation; posts then carry sentinel content.
    pub translation: Option<OpenAiConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(defaults.max_connections),
                min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(defaults.min_connections),
                ..defaults
            }
        });

        let translation = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|api_key| {
                let mut config = OpenAiConfig::new(api_key);
                if let Ok(url) = env::var("OPENAI_BASE_URL") {
                    config = config.with_base_url(url);
                }
                if let Ok(model) = env::var("OPENAI_MODEL") {
                    config = config.with_model(model);
                }
                if let Ok(language) = env::var("TRANSLATION_TARGET_LANGUAGE") {
                    config = config.with_target_language(language);
                }
                if let Some(secs) = parse_var("TRANSLATION_TIMEOUT_SECS") {
                    config = config.with_timeout(Duration::from_secs(secs));
                }
                config
            });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            translation,
        }
    }
}

/// Parse an environment variable, ignoring it when absent or malformed.
fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring malformed environment variable");
            None
        }
    }
}
