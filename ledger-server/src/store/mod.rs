//! redb-based tenant store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `rows` | `(tenant_id, kind, id)` | JSON row | Every entity row, partitioned by tenant |
//! | `sequences` | `kind` | `u64` | Last issued id per entity kind |
//! | `open_tabs` | `(tenant_id, table_id)` | `tab_id` | At most one open tab per table |
//! | `children` | `(tenant_id, child_kind, parent_id, child_id)` | `()` | Orders and payments per tab, items per order |
//!
//! # Concurrency
//!
//! redb admits a single write transaction at a time; [`TenantStore::transaction`]
//! holds it for the whole check → mutate → recalculate sequence, so ledger
//! mutations are serialized. Read transactions are MVCC snapshots and never
//! see a partially applied write.

mod deadline;
mod record;
mod scope;

pub use deadline::with_deadline;
pub use record::{EntityKind, Record};
pub use scope::{TenantSnapshot, TenantTxn};

use redb::{Database, ReadableDatabase, TableDefinition};
use shared::error::{AppError, ErrorCode};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::tenant::TenantId;

/// Key of the `rows` table: (tenant_id, kind, id)
type RowKey = (&'static str, &'static str, u64);

/// Table for entity rows: value = JSON-serialized row
const ROWS_TABLE: TableDefinition<RowKey, &[u8]> = TableDefinition::new("rows");

/// Table for id counters: key = entity kind, value = last issued id
const SEQUENCES_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequences");

/// Table for the open-tab index: key = (tenant_id, table_id), value = tab_id
const OPEN_TABS_TABLE: TableDefinition<(&str, u64), u64> = TableDefinition::new("open_tabs");

/// Key of the `children` table: (tenant_id, child kind, parent_id, child_id)
type ChildKey = (&'static str, &'static str, u64, u64);

/// Parent index for ledger rows, so a tab's rows are read without a tenant-wide scan
const CHILDREN_TABLE: TableDefinition<ChildKey, ()> = TableDefinition::new("children");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0} {1} not found")]
    NotFound(EntityKind, u64),

    #[error("Request deadline passed before commit")]
    DeadlineExceeded,
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(kind, id) => AppError::not_found(kind, id),
            StorageError::DeadlineExceeded => {
                tracing::warn!("Transaction aborted at request deadline");
                AppError::with_message(
                    ErrorCode::RequestTimeout,
                    "Request timed out; no changes were applied",
                )
            }
            other => {
                tracing::error!(error = %other, "Storage error occurred");
                AppError::internal("Storage failure")
            }
        }
    }
}

/// Tenant-partitioned row store backed by redb
#[derive(Clone)]
pub struct TenantStore {
    db: Arc<Database>,
}

impl TenantStore {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate` by default: once
    /// [`transaction`](Self::transaction) returns `Ok`, the write is on disk.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create all tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ROWS_TABLE)?;
            let _ = write_txn.open_table(SEQUENCES_TABLE)?;
            let _ = write_txn.open_table(OPEN_TABS_TABLE)?;
            let _ = write_txn.open_table(CHILDREN_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Run `f` inside the exclusive write transaction, scoped to `tenant`
    ///
    /// Commits when `f` returns `Ok`. On `Err` the transaction is aborted and
    /// nothing `f` wrote is kept; a panic drops the transaction with the same
    /// effect. A deadline installed with [`with_deadline`] that has passed
    /// once the write lock is held, or by the time `f` returns, aborts with
    /// [`StorageError::DeadlineExceeded`].
    pub fn transaction<T, E, F>(&self, tenant: &TenantId, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut TenantTxn<'_>) -> Result<T, E>,
        E: From<StorageError>,
    {
        let txn = self.db.begin_write().map_err(StorageError::from)?;
        let outcome = if deadline::expired() {
            Err(StorageError::DeadlineExceeded.into())
        } else {
            let mut scoped = TenantTxn::new(&txn, tenant);
            f(&mut scoped).and_then(|value| {
                if deadline::expired() {
                    Err(StorageError::DeadlineExceeded.into())
                } else {
                    Ok(value)
                }
            })
        };

        match outcome {
            Ok(value) => {
                txn.commit().map_err(StorageError::from)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(abort_err) = txn.abort() {
                    tracing::warn!(tenant = %tenant, error = %abort_err, "Failed to abort transaction");
                }
                Err(err)
            }
        }
    }

    /// Run `f` against a read snapshot of `tenant`'s partition
    pub fn snapshot<T, E, F>(&self, tenant: &TenantId, f: F) -> Result<T, E>
    where
        F: FnOnce(&TenantSnapshot<'_>) -> Result<T, E>,
        E: From<StorageError>,
    {
        if deadline::expired() {
            return Err(StorageError::DeadlineExceeded.into());
        }
        let txn = self.db.begin_read().map_err(StorageError::from)?;
        let view = TenantSnapshot::new(&txn, tenant);
        f(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Category;
    use std::time::{Duration, Instant};

    fn tenant(id: &str) -> TenantId {
        TenantId::parse(id).unwrap()
    }

    fn insert_category(store: &TenantStore, t: &TenantId, name: &str) -> Category {
        store
            .transaction(t, |txn| {
                txn.insert(|id| Category {
                    id,
                    tenant_id: t.to_string(),
                    name: name.to_string(),
                })
            })
            .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let store = TenantStore::open_in_memory().unwrap();
        let t = tenant("acme");
        let created = insert_category(&store, &t, "Drinks");
        assert_eq!(created.id, 1);

        let loaded: Option<Category> = store
            .snapshot(&t, |view| view.get(created.id))
            .unwrap();
        assert_eq!(loaded, Some(created));
    }

    #[test]
    fn test_rows_are_partitioned_by_tenant() {
        let store = TenantStore::open_in_memory().unwrap();
        let t1 = tenant("t1");
        let t2 = tenant("t2");
        let created = insert_category(&store, &t1, "Drinks");

        let result: StorageResult<Category> = store.snapshot(&t2, |view| view.require(created.id));
        assert!(matches!(
            result,
            Err(StorageError::NotFound(EntityKind::Category, 1))
        ));

        let listed: Vec<Category> = store
            .snapshot(&t2, |view| view.list())
            .unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_ids_are_unique_per_kind_across_tenants() {
        let store = TenantStore::open_in_memory().unwrap();
        let a = insert_category(&store, &tenant("t1"), "A");
        let b = insert_category(&store, &tenant("t2"), "B");
        let c = insert_category(&store, &tenant("t1"), "C");
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[test]
    fn test_list_ordered_by_id() {
        let store = TenantStore::open_in_memory().unwrap();
        let t = tenant("acme");
        for name in ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K"] {
            insert_category(&store, &t, name);
        }
        let listed: Vec<Category> = store
            .snapshot(&t, |view| view.list())
            .unwrap();
        let ids: Vec<u64> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_error_rolls_back_all_writes() {
        let store = TenantStore::open_in_memory().unwrap();
        let t = tenant("acme");

        let result: Result<(), StorageError> = store.transaction(&t, |txn| {
            txn.insert(|id| Category {
                id,
                tenant_id: "acme".to_string(),
                name: "Ghost".to_string(),
            })?;
            txn.mark_tab_open(9, 1)?;
            Err(StorageError::NotFound(EntityKind::Tab, 1))
        });
        assert!(result.is_err());

        let listed: Vec<Category> = store
            .snapshot(&t, |view| view.list())
            .unwrap();
        assert!(listed.is_empty());

        // The id counter rolled back too
        let next = insert_category(&store, &t, "Real");
        assert_eq!(next.id, 1);

        let open: Option<u64> = store
            .transaction(&t, |txn| txn.open_tab_for_table(9))
            .unwrap();
        assert_eq!(open, None);
    }

    #[test]
    fn test_put_and_remove() {
        let store = TenantStore::open_in_memory().unwrap();
        let t = tenant("acme");
        let mut row = insert_category(&store, &t, "Old");
        row.name = "New".to_string();

        store
            .transaction(&t, |txn| txn.put(&row))
            .unwrap();
        let loaded: Category = store
            .snapshot(&t, |view| view.require(row.id))
            .unwrap();
        assert_eq!(loaded.name, "New");

        let removed: bool = store
            .transaction(&t, |txn| txn.remove::<Category>(row.id))
            .unwrap();
        assert!(removed);
        let removed_again: bool = store
            .transaction(&t, |txn| txn.remove::<Category>(row.id))
            .unwrap();
        assert!(!removed_again);
    }

    #[test]
    fn test_open_tab_index_is_tenant_scoped() {
        let store = TenantStore::open_in_memory().unwrap();
        let t1 = tenant("t1");
        let t2 = tenant("t2");

        store
            .transaction(&t1, |txn| txn.mark_tab_open(5, 42))
            .unwrap();

        let seen_by_t1: Option<u64> = store
            .transaction(&t1, |txn| txn.open_tab_for_table(5))
            .unwrap();
        let seen_by_t2: Option<u64> = store
            .transaction(&t2, |txn| txn.open_tab_for_table(5))
            .unwrap();
        assert_eq!(seen_by_t1, Some(42));
        assert_eq!(seen_by_t2, None);

        store
            .transaction(&t1, |txn| txn.clear_open_tab(5))
            .unwrap();
        let cleared: Option<u64> = store
            .transaction(&t1, |txn| txn.open_tab_for_table(5))
            .unwrap();
        assert_eq!(cleared, None);
    }

    #[test]
    fn test_expired_deadline_commits_nothing() {
        let store = TenantStore::open_in_memory().unwrap();
        let t = tenant("acme");

        let result: StorageResult<Category> = with_deadline(Some(Instant::now()), || {
            store.transaction(&t, |txn| {
                txn.insert(|id| Category {
                    id,
                    tenant_id: "acme".to_string(),
                    name: "Late".to_string(),
                })
            })
        });
        assert!(matches!(result, Err(StorageError::DeadlineExceeded)));

        let listed: Vec<Category> = store.snapshot(&t, |view| view.list()).unwrap();
        assert!(listed.is_empty());
        assert_eq!(insert_category(&store, &t, "On time").id, 1);
    }

    #[test]
    fn test_deadline_passing_during_work_aborts_commit() {
        let store = TenantStore::open_in_memory().unwrap();
        let t = tenant("acme");
        let deadline = Instant::now() + Duration::from_millis(20);

        let result: StorageResult<Category> = with_deadline(Some(deadline), || {
            store.transaction(&t, |txn| {
                let row = txn.insert(|id| Category {
                    id,
                    tenant_id: "acme".to_string(),
                    name: "Slow".to_string(),
                })?;
                std::thread::sleep(Duration::from_millis(50));
                Ok(row)
            })
        });
        assert!(matches!(result, Err(StorageError::DeadlineExceeded)));

        let listed: Vec<Category> = store.snapshot(&t, |view| view.list()).unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_deadline_maps_to_request_timeout() {
        let err: AppError = StorageError::DeadlineExceeded.into();
        assert_eq!(err.code, ErrorCode::RequestTimeout);
        assert_eq!(err.http_status().as_u16(), 408);
    }

    #[test]
    fn test_children_are_scoped_to_parent_and_tenant() {
        let store = TenantStore::open_in_memory().unwrap();
        let t1 = tenant("t1");
        let t2 = tenant("t2");

        let (a, b) = store
            .transaction(&t1, |txn| {
                let a = txn.insert(|id| Category {
                    id,
                    tenant_id: "t1".to_string(),
                    name: "A".to_string(),
                })?;
                let b = txn.insert(|id| Category {
                    id,
                    tenant_id: "t1".to_string(),
                    name: "B".to_string(),
                })?;
                txn.link_child(7, &b)?;
                txn.link_child(7, &a)?;
                txn.link_child(8, &b)?;
                Ok::<_, StorageError>((a, b))
            })
            .unwrap();

        let under_7: Vec<Category> = store
            .transaction(&t1, |txn| txn.children(7))
            .unwrap();
        assert_eq!(under_7, vec![a, b.clone()]);

        let under_8: Vec<Category> = store
            .transaction(&t1, |txn| txn.children(8))
            .unwrap();
        assert_eq!(under_8, vec![b]);

        let other_tenant: Vec<Category> = store
            .transaction(&t2, |txn| txn.children(7))
            .unwrap();
        assert!(other_tenant.is_empty());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.redb");
        let t = tenant("acme");

        {
            let store = TenantStore::open(&path).unwrap();
            insert_category(&store, &t, "Durable");
        }

        let store = TenantStore::open(&path).unwrap();
        let listed: Vec<Category> = store
            .snapshot(&t, |view| view.list())
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Durable");

        // Sequence continues after reopen
        let next = insert_category(&store, &t, "Second");
        assert_eq!(next.id, 2);
    }
}
