//! # Auth Error Types

use thiserror::Error;

/// Errors raised by credential and identity handling.
///
/// The permission resolver itself never errors; these cover the
/// credential paths around it.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A cryptographic primitive failed (malformed hash, hashing error).
    #[error("crypto error: {0}")]
    Crypto(String),

    /// A presented reset token was expired or did not match.
    #[error("invalid reset token: {0}")]
    InvalidResetToken(String),
}
