//! # Babel Core
//!
//! The domain layer of the Babel posts service.
//! This crate contains the post model, cursor pagination and the
//! translate-then-store workflow, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
