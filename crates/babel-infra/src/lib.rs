//! # Babel Infrastructure
//!
//! Concrete implementations of the ports defined in `babel-core`.
//! This crate contains the post stores and translation provider integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store and no translation
//! - `postgres` - PostgreSQL post store via SeaORM
//! - `openai` - OpenAI chat-completions translator via reqwest

pub mod database;
pub mod translation;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use translation::{DisabledTranslator, OpenAiConfig};

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;

#[cfg(feature = "openai")]
pub use translation::OpenAiTranslator;
