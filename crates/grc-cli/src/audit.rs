//! # Audit Subcommand
//!
//! Reads a tenant's snapshot from the filesystem store and prints the
//! audit trail in write order, one line per entry.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use grc_core::TenantId;
use grc_store::{FileSnapshotStore, SnapshotStore};

/// Arguments for the audit subcommand.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// The tenant UUID to inspect.
    #[arg(long)]
    pub tenant: String,

    /// Snapshot root directory.
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Emit entries as JSON instead of text lines.
    #[arg(long)]
    pub json: bool,
}

/// Print one tenant's audit trail.
pub fn run(args: AuditArgs) -> anyhow::Result<()> {
    let tenant = TenantId::parse(&args.tenant).map_err(|e| anyhow::anyhow!("{e}"))?;
    let store = FileSnapshotStore::new(args.data_dir);
    let data = store
        .load(&tenant)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("reading snapshot")?
        .with_context(|| format!("no snapshot for tenant {tenant}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(data.audit.entries())?);
        return Ok(());
    }
    for entry in data.audit.entries() {
        println!(
            "{}  {:<24} {:<20} {}{}",
            entry.timestamp.to_iso8601(),
            entry.action,
            entry.actor_name,
            entry.details,
            entry
                .target
                .as_deref()
                .map(|t| format!("  [{t}]"))
                .unwrap_or_default(),
        );
    }
    Ok(())
}
