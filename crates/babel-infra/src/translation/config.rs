use std::time::Duration;

/// Settings for the OpenAI chat-completions translator.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// API root, e.g. `https://api.openai.com/v1` (Azure and proxies differ).
    pub base_url: String,
    pub model: String,
    /// Language named in the prompts, e.g. `spanish`.
    pub target_language: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4-1106-preview";
    pub const DEFAULT_TARGET_LANGUAGE: &'static str = "spanish";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            target_language: Self::DEFAULT_TARGET_LANGUAGE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are a professional english to {} translator.",
            self.target_language
        )
    }

    pub fn user_prompt(&self, text: &str) -> String {
        format!(
            "Translate the following text to {}: {text}",
            self.target_language
        )
    }
}
