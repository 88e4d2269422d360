//! # Core Error Types
//!
//! The error type shared by the foundational primitives. Domain crates
//! define their own `thiserror` hierarchies and convert from `CoreError`
//! where they parse core types.

use thiserror::Error;

/// Errors raised by the foundational types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A value failed validation (malformed identifier, timestamp, or
    /// enum tag).
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
