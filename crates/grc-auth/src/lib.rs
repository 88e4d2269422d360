//! # grc-auth — Authorization Primitives
//!
//! Everything between "who is calling" and "what may they do":
//!
//! - **Permission model** (`permission.rs`): the exhaustive `Permission`
//!   enum, `PermissionSet`, and the data-driven `RolePermissionMap`
//!   (a base grant set plus per-role additive overrides — adding a
//!   capability touches one grant list).
//!
//! - **Resolver** (`resolver.rs`): the pure
//!   `resolve(role, access_expires_at, now)` function. Expired access
//!   downgrades to the Employee set — fail-safe, never fail-closed-empty,
//!   never an error.
//!
//! - **Principal** (`principal.rs`): the authenticated caller context and
//!   the mapping from an external identity-provider record to an internal
//!   role, defaulting to the lowest-privilege role when no assignment is
//!   stored.
//!
//! - **Credentials** (`credentials.rs`): Argon2id password hashing and
//!   single-use, hashed password-reset tokens with expiry.
//!
//! - **Session** (`session.rs`): the injectable idle-countdown state
//!   machine (`Active → Warning → Expired`) that the periphery drives to
//!   tear down principal context.
//!
//! ## Crate Policy
//!
//! - Pure functions take `now` as an argument; nothing here reads the
//!   clock except convenience wrappers at the edges.
//! - No `unsafe`, no panics outside tests.

pub mod credentials;
pub mod error;
pub mod permission;
pub mod principal;
pub mod resolver;
pub mod session;

pub use credentials::{hash_password, verify_password, ResetToken, ResetTokenRecord};
pub use error::AuthError;
pub use permission::{Permission, PermissionSet, RolePermissionMap, PERMISSION_COUNT};
pub use principal::{map_external_identity, ExternalIdentity, Principal};
pub use resolver::resolve;
pub use session::{SessionCountdown, SessionState, SessionWindows};
