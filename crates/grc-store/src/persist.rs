//! # Persistence Interfaces
//!
//! Durable local persistence is a key-value store keyed by tenant id,
//! holding one full snapshot of the tenant's bundle: read at startup to
//! rehydrate, written after every successful update. The optional
//! remote mirror is an eventually-consistent copy the core never reads
//! from mid-session.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use grc_core::TenantId;

use crate::company::CompanyData;

/// Errors from durable persistence.
#[derive(Error, Debug)]
pub enum PersistError {
    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable snapshot storage, one snapshot per tenant.
pub trait SnapshotStore: Send + Sync {
    /// Load a tenant's snapshot, if one exists.
    fn load(&self, tenant: &TenantId) -> Result<Option<CompanyData>, PersistError>;

    /// Write a tenant's snapshot, replacing any prior one.
    fn save(&self, tenant: &TenantId, data: &CompanyData) -> Result<(), PersistError>;
}

/// Eventually-consistent remote copy of tenant bundles.
///
/// Contract: implementations must not block the caller — hand the work
/// to a queue or task and return. Sync failures are the implementation's
/// to log; the store treats the call as fire-and-forget.
pub trait RemoteMirror: Send + Sync {
    /// Mirror a tenant's bundle after a committed update.
    fn sync(&self, tenant: &TenantId, data: &CompanyData);
}

/// Filesystem snapshot store: `<root>/<tenant-uuid>.json`, one document
/// per tenant.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    /// A snapshot store rooted at the given directory. The directory is
    /// created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of this store.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// The snapshot path for a tenant.
    pub fn snapshot_path(&self, tenant: &TenantId) -> PathBuf {
        self.root.join(format!("{}.json", tenant.as_uuid()))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, tenant: &TenantId) -> Result<Option<CompanyData>, PersistError> {
        let path = self.snapshot_path(tenant);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, tenant: &TenantId, data: &CompanyData) -> Result<(), PersistError> {
        fs::create_dir_all(&self.root)?;
        let bytes = serde_json::to_vec_pretty(data)?;
        fs::write(self.snapshot_path(tenant), bytes)?;
        Ok(())
    }
}
