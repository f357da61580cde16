//! Application state - shared across all handlers.

use std::sync::Arc;

use babel_core::PostService;
use babel_core::ports::{PostRepository, Translator};
use babel_infra::{DisabledTranslator, InMemoryPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Which post store is in use, reported by the health check.
    pub storage: &'static str,
    /// Which translation provider is in use, reported by the health check.
    pub translation: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (repo, storage) = Self::post_repository(config).await;
        let (translator, translation) = Self::translator(config);

        tracing::info!(storage, translation, "Application state initialized");

        Self {
            posts: PostService::new(repo, translator),
            storage,
            translation,
        }
    }

    /// State over explicit implementations.
    pub fn from_parts(
        repo: Arc<dyn PostRepository>,
        translator: Arc<dyn Translator>,
        storage: &'static str,
        translation: &'static str,
    ) -> Self {
        Self {
            posts: PostService::new(repo, translator),
            storage,
            translation,
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        use babel_infra::PostgresPostRepository;
        use babel_infra::database::connect;

        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Arc::new(InMemoryPostRepository::new()), "memory");
        };

        match connect(db_config).await {
            Ok(conn) => (Arc::new(PostgresPostRepository::new(conn)), "postgres"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database. Using in-memory fallback.");
                (Arc::new(InMemoryPostRepository::new()), "memory")
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Using in-memory post repository");
        (Arc::new(InMemoryPostRepository::new()), "memory")
    }

    #[cfg(feature = "openai")]
    fn translator(config: &AppConfig) -> (Arc<dyn Translator>, &'static str) {
        use babel_infra::OpenAiTranslator;

        let Some(openai) = &config.translation else {
            tracing::warn!("OPENAI_API_KEY not set. Posts will store untranslated sentinel text.");
            return (Arc::new(DisabledTranslator), "disabled");
        };

        match OpenAiTranslator::new(openai.clone()) {
            Ok(translator) => {
                tracing::info!(
                    model = %openai.model,
                    target_language = %openai.target_language,
                    "OpenAI translator configured"
                );
                (Arc::new(translator), "openai")
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build OpenAI client. Translation disabled.");
                (Arc::new(DisabledTranslator), "disabled")
            }
        }
    }

    #[cfg(not(feature = "openai"))]
    fn translator(config: &AppConfig) -> (Arc<dyn Translator>, &'static str) {
        if config.translation.is_some() {
            tracing::warn!("OPENAI_API_KEY ignored: built without the openai feature");
        }
        (Arc::new(DisabledTranslator), "disabled")
    }
}
