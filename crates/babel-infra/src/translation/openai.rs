//! OpenAI chat-completions translator.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use babel_core::error::TranslationError;
use babel_core::ports::Translator;

use super::OpenAiConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Translator backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenAiTranslator {
    http_client: Client,
    config: OpenAiConfig,
}

impl OpenAiTranslator {
    pub fn new(config: OpenAiConfig) -> Result<Self, TranslationError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranslationError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn request_body(&self, text: &str) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: self.config.system_prompt(),
                },
                Message {
                    role: "user",
                    content: self.config.user_prompt(text),
                },
            ],
        }
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    #[tracing::instrument(skip_all, fields(chars = text.chars().count()))]
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!(
                "{}/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "OpenAI request failed");
                TranslationError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(TranslationError::Api(format!("{status}: {error_text}")));
        }

        let raw: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| TranslationError::Parse(e.to_string()))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(TranslationError::EmptyResponse)?;

        tracing::debug!(
            model = %self.config.model,
            duration_ms = start.elapsed().as_millis() as u64,
            "OpenAI translation completed"
        );

        Ok(content)
    }
}
