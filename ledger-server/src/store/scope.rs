//! Tenant-bound views over a redb transaction
//!
//! Neither view exposes a way to address a row without the tenant it was
//! created with.

use redb::{ReadTransaction, ReadableTable, WriteTransaction};

use super::record::{EntityKind, Record};
use super::{
    CHILDREN_TABLE, OPEN_TABS_TABLE, ROWS_TABLE, RowKey, SEQUENCES_TABLE, StorageError,
    StorageResult,
};
use crate::tenant::TenantId;

fn read_row<R: Record>(
    table: &impl ReadableTable<RowKey, &'static [u8]>,
    tenant: &TenantId,
    id: u64,
) -> StorageResult<Option<R>> {
    match table.get((tenant.as_str(), R::KIND.as_str(), id))? {
        Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
        None => Ok(None),
    }
}

fn read_rows<R: Record>(
    table: &impl ReadableTable<RowKey, &'static [u8]>,
    tenant: &TenantId,
) -> StorageResult<Vec<R>> {
    let kind = R::KIND.as_str();
    let range_start = (tenant.as_str(), kind, 0u64);
    let range_end = (tenant.as_str(), kind, u64::MAX);

    let mut rows = Vec::new();
    for result in table.range(range_start..=range_end)? {
        let (_key, value) = result?;
        rows.push(serde_json::from_slice(value.value())?);
    }
    Ok(rows)
}

/// Exclusive read-write access to one tenant partition
///
/// Only obtainable inside [`TenantStore::transaction`](super::TenantStore::transaction).
pub struct TenantTxn<'a> {
    txn: &'a WriteTransaction,
    tenant: &'a TenantId,
}

impl<'a> TenantTxn<'a> {
    pub(super) fn new(txn: &'a WriteTransaction, tenant: &'a TenantId) -> Self {
        Self { txn, tenant }
    }

    pub fn tenant(&self) -> &TenantId {
        self.tenant
    }

    pub fn get<R: Record>(&self, id: u64) -> StorageResult<Option<R>> {
        let table = self.txn.open_table(ROWS_TABLE)?;
        read_row(&table, self.tenant, id)
    }

    /// Like [`get`](Self::get), but a missing row is [`StorageError::NotFound`]
    pub fn require<R: Record>(&self, id: u64) -> StorageResult<R> {
        self.get(id)?.ok_or(StorageError::NotFound(R::KIND, id))
    }

    /// All rows of one kind for this tenant, ordered by id
    pub fn list<R: Record>(&self) -> StorageResult<Vec<R>> {
        let table = self.txn.open_table(ROWS_TABLE)?;
        read_rows(&table, self.tenant)
    }

    /// Allocate the next id for `R` and persist the row built from it
    pub fn insert<R: Record>(&mut self, build: impl FnOnce(u64) -> R) -> StorageResult<R> {
        let id = self.next_id(R::KIND)?;
        let row = build(id);
        self.put(&row)?;
        Ok(row)
    }

    /// Write a row under its own id, replacing any previous version
    pub fn put<R: Record>(&mut self, row: &R) -> StorageResult<()> {
        let bytes = serde_json::to_vec(row)?;
        let mut table = self.txn.open_table(ROWS_TABLE)?;
        table.insert(
            (self.tenant.as_str(), R::KIND.as_str(), row.id()),
            bytes.as_slice(),
        )?;
        Ok(())
    }

    /// Returns whether a row was removed
    pub fn remove<R: Record>(&mut self, id: u64) -> StorageResult<bool> {
        let mut table = self.txn.open_table(ROWS_TABLE)?;
        let removed = table
            .remove((self.tenant.as_str(), R::KIND.as_str(), id))?
            .is_some();
        Ok(removed)
    }

    // ========== Open Tab Index ==========

    /// Id of the open tab on a dining table, if any
    pub fn open_tab_for_table(&self, table_id: u64) -> StorageResult<Option<u64>> {
        let table = self.txn.open_table(OPEN_TABS_TABLE)?;
        let tab_id = table
            .get((self.tenant.as_str(), table_id))?
            .map(|guard| guard.value());
        Ok(tab_id)
    }

    pub fn mark_tab_open(&mut self, table_id: u64, tab_id: u64) -> StorageResult<()> {
        let mut table = self.txn.open_table(OPEN_TABS_TABLE)?;
        table.insert((self.tenant.as_str(), table_id), tab_id)?;
        Ok(())
    }

    pub fn clear_open_tab(&mut self, table_id: u64) -> StorageResult<()> {
        let mut table = self.txn.open_table(OPEN_TABS_TABLE)?;
        table.remove((self.tenant.as_str(), table_id))?;
        Ok(())
    }

    // ========== Parent Index ==========

    /// Record `child` as belonging to `parent_id`
    ///
    /// The parent kind is implied by `R`: orders and payments hang off a tab,
    /// items off an order.
    pub fn link_child<R: Record>(&mut self, parent_id: u64, child: &R) -> StorageResult<()> {
        let mut table = self.txn.open_table(CHILDREN_TABLE)?;
        table.insert(
            (self.tenant.as_str(), R::KIND.as_str(), parent_id, child.id()),
            (),
        )?;
        Ok(())
    }

    /// Rows of kind `R` linked to `parent_id`, ordered by id
    pub fn children<R: Record>(&self, parent_id: u64) -> StorageResult<Vec<R>> {
        let ids = {
            let table = self.txn.open_table(CHILDREN_TABLE)?;
            let tenant = self.tenant.as_str();
            let kind = R::KIND.as_str();

            let range_start = (tenant, kind, parent_id, 0u64);
            let range_end = (tenant, kind, parent_id, u64::MAX);

            let mut ids = Vec::new();
            for result in table.range(range_start..=range_end)? {
                let (key, _) = result?;
                ids.push(key.value().3);
            }
            ids
        };

        let table = self.txn.open_table(ROWS_TABLE)?;
        ids.into_iter()
            .map(|id| {
                read_row(&table, self.tenant, id)?.ok_or(StorageError::NotFound(R::KIND, id))
            })
            .collect()
    }

    // ========== Sequence Operations ==========

    fn next_id(&mut self, kind: EntityKind) -> StorageResult<u64> {
        let mut table = self.txn.open_table(SEQUENCES_TABLE)?;
        let current = table
            .get(kind.as_str())?
            .map(|guard| guard.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(kind.as_str(), next)?;
        Ok(next)
    }
}

/// Consistent read-only view of one tenant partition
pub struct TenantSnapshot<'a> {
    txn: &'a ReadTransaction,
    tenant: &'a TenantId,
}

impl<'a> TenantSnapshot<'a> {
    pub(super) fn new(txn: &'a ReadTransaction, tenant: &'a TenantId) -> Self {
        Self { txn, tenant }
    }

    pub fn get<R: Record>(&self, id: u64) -> StorageResult<Option<R>> {
        let table = self.txn.open_table(ROWS_TABLE)?;
        read_row(&table, self.tenant, id)
    }

    pub fn require<R: Record>(&self, id: u64) -> StorageResult<R> {
        self.get(id)?.ok_or(StorageError::NotFound(R::KIND, id))
    }

    pub fn list<R: Record>(&self) -> StorageResult<Vec<R>> {
        let table = self.txn.open_table(ROWS_TABLE)?;
        read_rows(&table, self.tenant)
    }
}
