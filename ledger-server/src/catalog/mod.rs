//! Reference catalog
//!
//! Generic tenant-scoped CRUD for the reference data the ledger reads:
//! categories, products, units, areas, users and dining tables. The set of
//! collections is the closed [`CatalogKind`] enum; each kind maps to a typed
//! row implementing [`CatalogEntity`].
//!
//! Deletes never cascade and are never blocked by rows that still point at
//! the deleted one. Foreign keys are only checked when the referencing row
//! is written.

mod entity;

pub use entity::{CatalogEntity, MAX_TABLE_CAPACITY};

use serde::Serialize;
use serde_json::Value;
use shared::error::{AppError, AppResult};
use shared::models::{Area, Category, DiningTable, ItemList, Product, Unit, User};

use crate::store::{StorageError, TenantStore};
use crate::tenant::TenantId;

/// Collections served under `/{entity}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Categories,
    Products,
    Units,
    Areas,
    Users,
    Tables,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 6] = [
        CatalogKind::Categories,
        CatalogKind::Products,
        CatalogKind::Units,
        CatalogKind::Areas,
        CatalogKind::Users,
        CatalogKind::Tables,
    ];

    /// Resolve a collection path segment, `entity_not_found` otherwise
    pub fn from_path(segment: &str) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.path() == segment)
            .ok_or_else(|| AppError::unknown_entity(segment))
    }

    pub const fn path(&self) -> &'static str {
        match self {
            CatalogKind::Categories => "categories",
            CatalogKind::Products => "products",
            CatalogKind::Units => "units",
            CatalogKind::Areas => "areas",
            CatalogKind::Users => "users",
            CatalogKind::Tables => "tables",
        }
    }
}

/// Bind `$entity` to the row type of `$kind` and evaluate `$body`
macro_rules! with_entity {
    ($kind:expr, $entity:ident => $body:expr) => {
        match $kind {
            CatalogKind::Categories => {
                type $entity = Category;
                $body
            }
            CatalogKind::Products => {
                type $entity = Product;
                $body
            }
            CatalogKind::Units => {
                type $entity = Unit;
                $body
            }
            CatalogKind::Areas => {
                type $entity = Area;
                $body
            }
            CatalogKind::Users => {
                type $entity = User;
                $body
            }
            CatalogKind::Tables => {
                type $entity = DiningTable;
                $body
            }
        }
    };
}

/// Catalog operations over a shared [`TenantStore`]
#[derive(Clone)]
pub struct CatalogService {
    store: TenantStore,
}

impl CatalogService {
    pub fn new(store: TenantStore) -> Self {
        Self { store }
    }

    // ========== Typed operations ==========

    pub fn create<E: CatalogEntity>(&self, tenant: &TenantId, input: E::Input) -> AppResult<E> {
        E::validate(&input)?;

        let row = self.store.transaction(tenant, |txn| {
            E::check_references(txn, &input)?;
            Ok::<_, AppError>(txn.insert(|id| E::build(id, tenant, input))?)
        })?;

        tracing::info!(tenant = %tenant, kind = %E::KIND, id = row.id(), "Catalog row created");
        Ok(row)
    }

    pub fn list<E: CatalogEntity>(&self, tenant: &TenantId) -> AppResult<Vec<E>> {
        self.store.snapshot(tenant, |view| Ok(view.list()?))
    }

    pub fn get<E: CatalogEntity>(&self, tenant: &TenantId, id: u64) -> AppResult<E> {
        self.store.snapshot(tenant, |view| Ok(view.require(id)?))
    }

    /// Full replacement of an existing row
    pub fn update<E: CatalogEntity>(
        &self,
        tenant: &TenantId,
        id: u64,
        input: E::Input,
    ) -> AppResult<E> {
        E::validate(&input)?;

        let row = self.store.transaction(tenant, |txn| {
            txn.require::<E>(id)?;
            E::check_references(txn, &input)?;
            let row = E::build(id, tenant, input);
            txn.put(&row)?;
            Ok::<_, AppError>(row)
        })?;

        tracing::info!(tenant = %tenant, kind = %E::KIND, id, "Catalog row updated");
        Ok(row)
    }

    pub fn delete<E: CatalogEntity>(&self, tenant: &TenantId, id: u64) -> AppResult<()> {
        self.store.transaction(tenant, |txn| {
            if !txn.remove::<E>(id)? {
                return Err(StorageError::NotFound(E::KIND, id).into());
            }
            Ok::<_, AppError>(())
        })?;

        tracing::info!(tenant = %tenant, kind = %E::KIND, id, "Catalog row deleted");
        Ok(())
    }

    // ========== JSON dispatch by kind ==========

    pub fn create_json(&self, kind: CatalogKind, tenant: &TenantId, body: Value) -> AppResult<Value> {
        with_entity!(kind, E => to_json(self.create::<E>(tenant, parse_input::<E>(body)?)?))
    }

    /// `{"items": [...]}` ordered by id
    pub fn list_json(&self, kind: CatalogKind, tenant: &TenantId) -> AppResult<Value> {
        with_entity!(kind, E => to_json(ItemList::from(self.list::<E>(tenant)?)))
    }

    pub fn get_json(&self, kind: CatalogKind, tenant: &TenantId, id: u64) -> AppResult<Value> {
        with_entity!(kind, E => to_json(self.get::<E>(tenant, id)?))
    }

    pub fn update_json(
        &self,
        kind: CatalogKind,
        tenant: &TenantId,
        id: u64,
        body: Value,
    ) -> AppResult<Value> {
        with_entity!(kind, E => to_json(self.update::<E>(tenant, id, parse_input::<E>(body)?)?))
    }

    pub fn delete_kind(&self, kind: CatalogKind, tenant: &TenantId, id: u64) -> AppResult<()> {
        with_entity!(kind, E => self.delete::<E>(tenant, id))
    }
}

fn parse_input<E: CatalogEntity>(body: Value) -> AppResult<E::Input> {
    serde_json::from_value(body)
        .map_err(|e| AppError::validation(format!("Invalid {} payload: {e}", E::KIND)))
}

fn to_json<T: Serialize>(value: T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::internal(format!("Serialization error: {e}")))
}
