//! # TenantStore — Arena-and-Index Shard Store
//!
//! One isolated shard per tenant id, reachable only through the index.
//! A per-shard mutex serializes writers, so each mutation sees the
//! latest committed state; readers get a clone of the last committed
//! value.
//!
//! ## Update Protocol
//!
//! 1. Resolve the shard by `TenantId` (rehydrating from the snapshot
//!    store on first touch).
//! 2. Run the mutator under the shard lock — a pure old-state→new-state
//!    transform evaluated to completion.
//! 3. After the in-memory commit, write the snapshot and kick the
//!    remote mirror, best-effort: failures are logged, surfaced as an
//!    operator notification, and never roll anything back.
//!
//! An absent tenant context (`None`) makes any update a no-op — no
//! principal, nothing to mutate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use grc_core::TenantId;

use crate::company::CompanyData;
use crate::notify::{Notification, NotificationSink, NullSink};
use crate::persist::{RemoteMirror, SnapshotStore};

/// The tenant-partitioned state store.
pub struct TenantStore {
    shards: RwLock<HashMap<TenantId, Arc<Mutex<CompanyData>>>>,
    snapshots: Option<Arc<dyn SnapshotStore>>,
    mirror: Option<Arc<dyn RemoteMirror>>,
    notifier: Arc<dyn NotificationSink>,
}

impl TenantStore {
    /// An in-memory store with no persistence sinks.
    pub fn in_memory() -> Self {
        Self {
            shards: RwLock::new(HashMap::new()),
            snapshots: None,
            mirror: None,
            notifier: Arc::new(NullSink),
        }
    }

    /// Attach a durable snapshot store (rehydration source + write-behind).
    pub fn with_snapshots(mut self, snapshots: Arc<dyn SnapshotStore>) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    /// Attach an optional remote mirror.
    pub fn with_mirror(mut self, mirror: Arc<dyn RemoteMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Attach a notification sink for persistence-failure notices.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The latest committed bundle for a tenant; the empty default
    /// bundle when the tenant context is absent.
    ///
    /// Reads never materialize a shard for an unknown tenant — only a
    /// snapshot on disk brings one into the arena, so arbitrary queried
    /// ids cannot grow it.
    pub fn get(&self, tenant: Option<&TenantId>) -> CompanyData {
        let Some(tenant) = tenant else {
            return CompanyData::default();
        };
        if let Some(shard) = self.existing_shard(tenant) {
            let data = lock_shard(&shard).clone();
            return data;
        }
        match self.snapshot(tenant) {
            Some(data) => {
                let shard = self.materialize(tenant, data);
                let data = lock_shard(&shard).clone();
                data
            }
            None => CompanyData::default(),
        }
    }

    /// Apply a mutator to a tenant's bundle.
    ///
    /// Returns `None` without touching anything when the tenant context
    /// is absent. Otherwise runs the mutator under the shard lock,
    /// commits in memory, performs the persistence side effects, and
    /// returns the mutator's value.
    pub fn update<R>(
        &self,
        tenant: Option<&TenantId>,
        mutator: impl FnOnce(&mut CompanyData) -> R,
    ) -> Option<R> {
        let Some(tenant) = tenant else {
            tracing::debug!("update without tenant context is a no-op");
            return None;
        };
        let shard = self.shard(tenant);
        let (result, committed) = {
            let mut guard = lock_shard(&shard);
            let result = mutator(&mut guard);
            (result, guard.clone())
        };
        self.persist(tenant, &committed);
        Some(result)
    }

    /// Apply a fallible mutator to a tenant's bundle.
    ///
    /// Like [`TenantStore::update`], but the persistence side effects
    /// run only when the mutator returns `Ok`. Mutators are expected to
    /// validate before mutating, so an `Err` leaves the bundle as it
    /// was.
    pub fn update_result<R, E>(
        &self,
        tenant: Option<&TenantId>,
        mutator: impl FnOnce(&mut CompanyData) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        let Some(tenant) = tenant else {
            tracing::debug!("update without tenant context is a no-op");
            return None;
        };
        let shard = self.shard(tenant);
        let (result, committed) = {
            let mut guard = lock_shard(&shard);
            let result = mutator(&mut guard);
            let committed = result.is_ok().then(|| guard.clone());
            (result, committed)
        };
        if let Some(data) = committed {
            self.persist(tenant, &data);
        }
        Some(result)
    }

    /// Ids of every tenant with a materialized shard.
    pub fn tenant_ids(&self) -> Vec<TenantId> {
        match self.shards.read() {
            Ok(guard) => guard.keys().copied().collect(),
            Err(poisoned) => poisoned.into_inner().keys().copied().collect(),
        }
    }

    /// Resolve a shard for mutation, rehydrating from the snapshot
    /// store on first touch.
    fn shard(&self, tenant: &TenantId) -> Arc<Mutex<CompanyData>> {
        if let Some(shard) = self.existing_shard(tenant) {
            return shard;
        }
        let initial = self.snapshot(tenant).unwrap_or_default();
        self.materialize(tenant, initial)
    }

    fn existing_shard(&self, tenant: &TenantId) -> Option<Arc<Mutex<CompanyData>>> {
        let shards = match self.shards.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        shards.get(tenant).map(Arc::clone)
    }

    fn materialize(&self, tenant: &TenantId, initial: CompanyData) -> Arc<Mutex<CompanyData>> {
        let mut shards = match self.shards.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Double-checked: another writer may have materialized it.
        if let Some(shard) = shards.get(tenant) {
            return Arc::clone(shard);
        }
        let shard = Arc::new(Mutex::new(initial));
        shards.insert(*tenant, Arc::clone(&shard));
        shard
    }

    /// Read a tenant's snapshot, if one exists. Load failures are
    /// logged and surfaced, then treated as absent.
    fn snapshot(&self, tenant: &TenantId) -> Option<CompanyData> {
        let snapshots = self.snapshots.as_ref()?;
        match snapshots.load(tenant) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(%tenant, error = %e, "snapshot rehydration failed, starting empty");
                self.notifier.notify(Notification::operator(format!(
                    "snapshot rehydration failed for {tenant}: {e}"
                )));
                None
            }
        }
    }

    /// Post-commit persistence side effects. Best-effort; failures are
    /// logged and surfaced, never propagated.
    fn persist(&self, tenant: &TenantId, data: &CompanyData) {
        if let Some(snapshots) = &self.snapshots {
            if let Err(e) = snapshots.save(tenant, data) {
                tracing::warn!(%tenant, error = %e, "snapshot write failed after commit");
                self.notifier.notify(Notification::operator(format!(
                    "snapshot write failed for {tenant}: {e}"
                )));
            }
        }
        if let Some(mirror) = &self.mirror {
            mirror.sync(tenant, data);
        }
    }
}

/// Lock a shard, recovering the data from a poisoned lock. A poisoned
/// shard holds the last committed state, which is exactly what the
/// contract promises readers.
fn lock_shard(shard: &Mutex<CompanyData>) -> MutexGuard<'_, CompanyData> {
    match shard.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::PersistError;
    use crate::tenant::{LicenseRecord, Tenant};
    use crate::user::User;
    use grc_core::Role;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_get_absent_tenant_is_default() {
        let store = TenantStore::in_memory();
        assert_eq!(store.get(None), CompanyData::default());
        assert_eq!(store.get(Some(&TenantId::new())), CompanyData::default());
    }

    #[test]
    fn test_get_unknown_tenant_leaves_no_shard() {
        let store = TenantStore::in_memory();
        for _ in 0..100 {
            assert_eq!(store.get(Some(&TenantId::new())), CompanyData::default());
        }
        assert!(store.tenant_ids().is_empty());
    }

    #[test]
    fn test_update_without_context_is_noop() {
        let store = TenantStore::in_memory();
        let result = store.update(None, |data| {
            data.users.push(User::new("x", "x@x.com", Role::Employee));
        });
        assert!(result.is_none());
    }

    #[test]
    fn test_update_commits_and_get_sees_it() {
        let store = TenantStore::in_memory();
        let tenant = TenantId::new();
        store.update(Some(&tenant), |data| {
            data.users.push(User::new("Nora", "n@x.com", Role::Ciso));
        });
        assert_eq!(store.get(Some(&tenant)).users.len(), 1);
    }

    #[test]
    fn test_updates_are_isolated_per_tenant() {
        let store = TenantStore::in_memory();
        let a = TenantId::new();
        let b = TenantId::new();
        store.update(Some(&a), |data| {
            data.users.push(User::new("A", "a@x.com", Role::Employee));
        });
        assert!(store.get(Some(&b)).users.is_empty());
        assert_eq!(store.get(Some(&a)).users.len(), 1);
    }

    #[test]
    fn test_update_result_err_skips_persistence() {
        struct CountingStore(AtomicUsize);
        impl SnapshotStore for CountingStore {
            fn load(&self, _: &TenantId) -> Result<Option<CompanyData>, PersistError> {
                Ok(None)
            }
            fn save(&self, _: &TenantId, _: &CompanyData) -> Result<(), PersistError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let counter = Arc::new(CountingStore(AtomicUsize::new(0)));
        let store = TenantStore::in_memory().with_snapshots(counter.clone());
        let tenant = TenantId::new();

        let r = store.update_result::<(), &str>(Some(&tenant), |_| Err("rejected"));
        assert_eq!(r, Some(Err("rejected")));
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);

        let r = store.update_result::<(), &str>(Some(&tenant), |_| Ok(()));
        assert_eq!(r, Some(Ok(())));
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_snapshot_write_does_not_roll_back() {
        struct FailingStore;
        impl SnapshotStore for FailingStore {
            fn load(&self, _: &TenantId) -> Result<Option<CompanyData>, PersistError> {
                Ok(None)
            }
            fn save(&self, _: &TenantId, _: &CompanyData) -> Result<(), PersistError> {
                Err(PersistError::Io(std::io::Error::other("disk full")))
            }
        }

        let notifier = Arc::new(crate::notify::RecordingSink::new());
        let store = TenantStore::in_memory()
            .with_snapshots(Arc::new(FailingStore))
            .with_notifier(notifier.clone());
        let tenant = TenantId::new();

        store.update(Some(&tenant), |data| {
            data.tenant = Some(Tenant::new("Acme", LicenseRecord::active("pro", None)));
        });

        // In-memory commit stands, operator was notified.
        assert!(store.get(Some(&tenant)).tenant.is_some());
        assert_eq!(notifier.sent().len(), 1);
    }

    #[test]
    fn test_rehydration_on_first_touch() {
        struct SeededStore(Mutex<CompanyData>);
        impl SnapshotStore for SeededStore {
            fn load(&self, _: &TenantId) -> Result<Option<CompanyData>, PersistError> {
                Ok(Some(lock_shard(&self.0).clone()))
            }
            fn save(&self, _: &TenantId, _: &CompanyData) -> Result<(), PersistError> {
                Ok(())
            }
        }

        let mut seeded = CompanyData::default();
        seeded.users.push(User::new("Rehydrated", "r@x.com", Role::Ceo));
        let store =
            TenantStore::in_memory().with_snapshots(Arc::new(SeededStore(Mutex::new(seeded))));

        let data = store.get(Some(&TenantId::new()));
        assert_eq!(data.users.len(), 1);
        assert_eq!(data.users[0].name, "Rehydrated");
        // A snapshot-backed read does bring the shard into the arena.
        assert_eq!(store.tenant_ids().len(), 1);
    }

    #[test]
    fn test_mirror_receives_committed_state() {
        struct RecordingMirror(Mutex<Vec<usize>>);
        impl RemoteMirror for RecordingMirror {
            fn sync(&self, _: &TenantId, data: &CompanyData) {
                if let Ok(mut guard) = self.0.lock() {
                    guard.push(data.users.len());
                }
            }
        }

        let mirror = Arc::new(RecordingMirror(Mutex::new(Vec::new())));
        let store = TenantStore::in_memory().with_mirror(mirror.clone());
        let tenant = TenantId::new();
        store.update(Some(&tenant), |data| {
            data.users.push(User::new("a", "a@x.com", Role::Employee));
        });
        store.update(Some(&tenant), |data| {
            data.users.push(User::new("b", "b@x.com", Role::Employee));
        });
        assert_eq!(*mirror.0.lock().unwrap(), vec![1, 2]);
    }
}
