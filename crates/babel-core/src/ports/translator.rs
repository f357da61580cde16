//! Translation port.

use async_trait::async_trait;

use crate::error::TranslationError;

/// Translator trait - abstraction over machine translation providers.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the configured target language.
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}
