//! # User Record
//!
//! A user belongs to exactly one tenant. Users are never hard-deleted by
//! the core; deactivation flips the `active` flag and keeps the record
//! (and its audit references) intact.

use serde::{Deserialize, Serialize};

use grc_auth::ResetTokenRecord;
use grc_core::{Role, Timestamp, UserId};

/// A tenant member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email, the join key for external identities.
    pub email: String,
    /// Assigned role.
    pub role: Role,
    /// Whether the email was verified.
    pub verified: bool,
    /// Optional access expiry; past it the user acts as Employee.
    pub access_expires_at: Option<Timestamp>,
    /// Whether MFA is enforced for this user.
    pub mfa_enabled: bool,
    /// Provider-held MFA secret reference, if enrolled.
    pub mfa_secret: Option<String>,
    /// Argon2id PHC hash; `None` for identity-provider-only accounts.
    pub password_hash: Option<String>,
    /// Outstanding password-reset token, if one was issued.
    pub reset_token: Option<ResetTokenRecord>,
    /// Deactivated users keep their record but cannot act.
    pub active: bool,
}

impl User {
    /// Create an active, unverified user with the given role.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
            verified: false,
            access_expires_at: None,
            mfa_enabled: false,
            mfa_secret: None,
            password_hash: None,
            reset_token: None,
            active: true,
        }
    }

    /// Deactivate the user. The record stays; the flag flips.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
