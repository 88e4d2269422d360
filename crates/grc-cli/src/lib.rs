//! # grc-cli — GRC Stack Command-Line Tool
//!
//! Handler modules for the `grc` binary:
//!
//! - `serve.rs` — load configuration, install the metrics recorder, and
//!   run the Axum application.
//! - `audit.rs` — read a tenant's snapshot and print its audit trail.
//! - `seed.rs` — persist a demo tenant with one user per role.

pub mod audit;
pub mod seed;
pub mod serve;
