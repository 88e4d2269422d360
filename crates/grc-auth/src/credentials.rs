//! # Credential Handling
//!
//! Argon2id password hashing and single-use password-reset tokens.
//!
//! ## Invariants
//!
//! - Only PHC-format Argon2id hashes are ever stored; plaintext never
//!   leaves this module's function arguments.
//! - Reset tokens are stored as SHA-256 digests with an expiry; the
//!   cleartext token exists only in the issuance return value.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use grc_core::Timestamp;

use crate::error::AuthError;

/// Hash a plaintext password with Argon2id, producing a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Crypto(format!("hashing failed: {e}")))
}

/// Verify a plaintext password against a stored Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

/// The stored half of a reset token: digest plus expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetTokenRecord {
    /// Hex SHA-256 digest of the cleartext token.
    pub digest: String,
    /// Instant past which the token is invalid.
    pub expires_at: Timestamp,
}

/// A freshly issued reset token. The cleartext is available exactly once.
#[derive(Debug)]
pub struct ResetToken {
    /// Cleartext token to deliver to the user out of band.
    pub cleartext: String,
    /// The record to store on the user.
    pub record: ResetTokenRecord,
}

impl ResetToken {
    /// Issue a new reset token valid for `ttl_secs` from `now`.
    pub fn issue(now: Timestamp, ttl_secs: i64) -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let cleartext = hex_encode(&bytes);
        let record = ResetTokenRecord {
            digest: sha256_hex(cleartext.as_bytes()),
            expires_at: now.plus_secs(ttl_secs),
        };
        Self { cleartext, record }
    }

    /// Redeem a presented token against a stored record.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidResetToken` when the token does not match the
    /// stored digest or the record has expired.
    pub fn redeem(
        presented: &str,
        record: &ResetTokenRecord,
        now: Timestamp,
    ) -> Result<(), AuthError> {
        if record.expires_at.is_past(now) {
            return Err(AuthError::InvalidResetToken("token expired".to_string()));
        }
        if sha256_hex(presented.as_bytes()) != record.digest {
            return Err(AuthError::InvalidResetToken("token mismatch".to_string()));
        }
        Ok(())
    }
}

/// Hex SHA-256 digest of a byte string.
fn sha256_hex(bytes: &[u8]) -> String {
    hex_encode(&Sha256::digest(bytes))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{b:02x}");
        s
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(iso: &str) -> Timestamp {
        Timestamp::parse(iso).unwrap()
    }

    #[test]
    fn test_correct_password_matches() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_does_not_match() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("pw", "not-a-hash").is_err());
    }

    #[test]
    fn test_reset_token_roundtrip() {
        let now = at("2026-03-01T10:00:00Z");
        let token = ResetToken::issue(now, 3600);
        assert!(ResetToken::redeem(&token.cleartext, &token.record, now).is_ok());
    }

    #[test]
    fn test_reset_token_expired() {
        let issued = at("2026-03-01T10:00:00Z");
        let token = ResetToken::issue(issued, 3600);
        let later = at("2026-03-01T11:00:01Z");
        let err = ResetToken::redeem(&token.cleartext, &token.record, later).unwrap_err();
        assert!(matches!(err, AuthError::InvalidResetToken(_)));
    }

    #[test]
    fn test_reset_token_mismatch() {
        let now = at("2026-03-01T10:00:00Z");
        let token = ResetToken::issue(now, 3600);
        let err = ResetToken::redeem("deadbeef", &token.record, now).unwrap_err();
        assert!(matches!(err, AuthError::InvalidResetToken(_)));
    }

    #[test]
    fn test_tokens_are_unique() {
        let now = at("2026-03-01T10:00:00Z");
        let a = ResetToken::issue(now, 60);
        let b = ResetToken::issue(now, 60);
        assert_ne!(a.cleartext, b.cleartext);
    }

    #[test]
    fn test_record_does_not_contain_cleartext() {
        let now = at("2026-03-01T10:00:00Z");
        let token = ResetToken::issue(now, 60);
        assert_ne!(token.record.digest, token.cleartext);
    }
}
