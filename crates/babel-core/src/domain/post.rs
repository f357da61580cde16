use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum title length, counted in characters.
pub const TITLE_MAX_CHARS: usize = 32;

/// Post entity - a titled piece of text stored in translated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post stamped with the current time.
    pub fn new(id: String, title: String, text: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            text,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub id: Option<String>,
    pub title: String,
    pub text: String,
}

impl NewPost {
    /// Validate raw creation input.
    ///
    /// A supplied id must be a UUID in 8-4-4-4-12 form; the title must be 1..=32 characters
    /// and the text non-empty.
    pub fn new(id: Option<String>, title: String, text: String) -> Result<Self, DomainError> {
        if let Some(id) = &id {
            let canonical = Uuid::parse_str(id)
                .ok()
                .filter(|uuid| uuid.hyphenated().to_string().eq_ignore_ascii_case(id));
            if canonical.is_none() {
                return Err(DomainError::Validation(format!(
                    "id '{id}' is not a hyphenated UUID"
                )));
            }
        }

        let title_chars = title.chars().count();
        if title_chars == 0 {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if title_chars > TITLE_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "title must be at most {TITLE_MAX_CHARS} characters, got {title_chars}"
            )));
        }

        if text.is_empty() {
            return Err(DomainError::Validation("text must not be empty".into()));
        }

        Ok(Self { id, title, text })
    }

    /// The supplied id, or a freshly generated one.
    pub fn id_or_generate(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}
