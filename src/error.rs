//! Error types for readable-article.
//!
//! Parsing, cleaning, annotation, normalization and flattening are total, so
//! the only failures surfaced here come from option validation, the delegated
//! Readability engine and JSON serialization.

use std::time::Duration;

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The delegated engine did not answer within the configured timeout.
    #[error("Readability engine timed out after {0:?}")]
    EngineTimeout(Duration),

    /// The delegated engine reported a failure.
    #[error("Readability engine failed: {0}")]
    Engine(String),

    /// The delegated engine was requested but the `readability` feature is disabled.
    #[error("Readability engine is not available (crate built without the `readability` feature)")]
    EngineUnavailable,

    /// An option value was rejected by [`Options::validate`](crate::Options::validate).
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Serializing an [`ArticleResult`](crate::ArticleResult) failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
