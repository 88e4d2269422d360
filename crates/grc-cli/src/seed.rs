//! # Seed Subcommand
//!
//! Creates a demo tenant with one user per role and persists its
//! snapshot. Developer convenience for exercising the API locally.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use grc_audit::AuditAction;
use grc_core::Role;
use grc_store::{CompanyData, FileSnapshotStore, LicenseRecord, Tenant, TenantStore, User};

/// Arguments for the seed subcommand.
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Snapshot root directory.
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Tenant display name.
    #[arg(long, default_value = "Demo Tenant")]
    pub name: String,
}

/// Create and persist a demo tenant, printing the ids needed to call
/// the API.
pub fn run(args: SeedArgs) -> anyhow::Result<()> {
    let store =
        TenantStore::in_memory().with_snapshots(Arc::new(FileSnapshotStore::new(args.data_dir)));

    let tenant = Tenant::new(args.name, LicenseRecord::active("demo", None));
    let tenant_id = tenant.id;

    let mut users = Vec::new();
    for role in Role::all() {
        let slug = role.as_str().to_lowercase();
        users.push(User::new(format!("Demo {role}"), format!("{slug}@demo.test"), *role));
    }

    println!("tenant: {}", tenant_id.as_uuid());
    for user in &users {
        println!("  {:<18} {}", user.role.to_string(), user.id.as_uuid());
    }

    store
        .update(Some(&tenant_id), move |data| {
            *data = CompanyData::for_tenant(tenant);
            for user in users {
                data.audit.append(
                    user.id,
                    &user.name,
                    AuditAction::UserCreated,
                    format!("seeded demo user {}", user.email),
                    Some(user.id.to_string()),
                );
                data.users.push(user);
            }
        })
        .ok_or_else(|| anyhow::anyhow!("tenant context vanished during seed"))?;

    tracing::info!(tenant = %tenant_id, "demo tenant persisted");
    Ok(())
}
