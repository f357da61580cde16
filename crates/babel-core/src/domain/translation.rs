use crate::error::TranslationError;

/// Content stored in place of a field whose translation failed.
pub const TRANSLATION_FAILED: &str = "Error: Could not translate into spanish.";

/// Outcome of translating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Translated(String),
    Failed,
}

impl Translation {
    /// Collapse a provider result, logging and absorbing the error.
    ///
    /// Blank output counts as a failure.
    pub fn from_result(field: &'static str, result: Result<String, TranslationError>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!(field, "Translation came back blank, storing sentinel");
                Self::Failed
            }
            Ok(text) => Self::Translated(text),
            Err(err) => {
                tracing::warn!(field, error = %err, "Translation failed, storing sentinel");
                Self::Failed
            }
        }
    }

    /// The translated text, or the sentinel on failure.
    pub fn into_content(self) -> String {
        match self {
            Self::Translated(text) => text,
            Self::Failed => TRANSLATION_FAILED.to_string(),
        }
    }
}
