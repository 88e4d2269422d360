//! # Store Error Types

use thiserror::Error;

/// Errors raised by the store's data types.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A value failed validation (malformed chain, oversized evidence).
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced record does not exist in the tenant's partition.
    #[error("not found: {0}")]
    NotFound(String),
}
