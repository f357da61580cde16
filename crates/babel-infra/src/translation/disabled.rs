use async_trait::async_trait;

use babel_core::error::TranslationError;
use babel_core::ports::Translator;

/// Translator used when no provider is configured.
///
/// Every call fails, so created posts carry the sentinel content.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, _text: &str) -> Result<String, TranslationError> {
        Err(TranslationError::Unavailable)
    }
}
