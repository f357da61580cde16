//! Translation providers.

mod config;
mod disabled;

#[cfg(feature = "openai")]
mod openai;

pub use config::OpenAiConfig;
pub use disabled::DisabledTranslator;

#[cfg(feature = "openai")]
pub use openai::OpenAiTranslator;
