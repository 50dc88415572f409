//! Per-entity schema: input validation, foreign keys and row construction

use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult};
use shared::models::{
    Area, AreaInput, Category, CategoryInput, DiningTable, DiningTableInput, Product,
    ProductInput, Unit, UnitInput, User, UserInput,
};

use crate::ledger::money::MAX_PRICE;
use crate::store::{Record, TenantTxn};
use crate::tenant::TenantId;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_ROLES_LEN, MAX_TIMEZONE_LEN, MIN_EMAIL_LEN,
    validate_f64_range, validate_i64_range, validate_required_text, validate_text_len,
};

/// Largest party a dining table can seat
pub const MAX_TABLE_CAPACITY: i64 = 20;

/// A reference data row managed through the generic catalog routes
pub trait CatalogEntity: Record {
    /// Request body for create and full replacement
    type Input: DeserializeOwned + Send;

    /// Field checks that need no storage access
    fn validate(input: &Self::Input) -> AppResult<()>;

    /// Foreign keys must resolve within the tenant at write time
    fn check_references(_txn: &TenantTxn<'_>, _input: &Self::Input) -> AppResult<()> {
        Ok(())
    }

    fn build(id: u64, tenant: &TenantId, input: Self::Input) -> Self;
}

/// `invalid_reference` unless `R` with `id` exists for the transaction's tenant
fn ensure_exists<R: Record>(txn: &TenantTxn<'_>, field: &str, id: u64) -> AppResult<()> {
    match txn.get::<R>(id)? {
        Some(_) => Ok(()),
        None => Err(AppError::invalid_reference(field, id)),
    }
}

impl CatalogEntity for Category {
    type Input = CategoryInput;

    fn validate(input: &Self::Input) -> AppResult<()> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)
    }

    fn build(id: u64, tenant: &TenantId, input: Self::Input) -> Self {
        Category {
            id,
            tenant_id: tenant.to_string(),
            name: input.name,
        }
    }
}

impl CatalogEntity for Product {
    type Input = ProductInput;

    fn validate(input: &Self::Input) -> AppResult<()> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_f64_range(input.price, "price", 0.0, MAX_PRICE)
    }

    fn check_references(txn: &TenantTxn<'_>, input: &Self::Input) -> AppResult<()> {
        ensure_exists::<Category>(txn, "category_id", input.category_id)
    }

    fn build(id: u64, tenant: &TenantId, input: Self::Input) -> Self {
        Product {
            id,
            tenant_id: tenant.to_string(),
            name: input.name,
            price: input.price,
            category_id: input.category_id,
        }
    }
}

impl CatalogEntity for Unit {
    type Input = UnitInput;

    fn validate(input: &Self::Input) -> AppResult<()> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&input.timezone, "timezone", MAX_TIMEZONE_LEN)?;
        validate_f64_range(input.service_fee_percent, "service_fee_percent", 0.0, 100.0)
    }

    fn build(id: u64, tenant: &TenantId, input: Self::Input) -> Self {
        Unit {
            id,
            tenant_id: tenant.to_string(),
            name: input.name,
            timezone: input.timezone,
            service_fee_enabled: input.service_fee_enabled,
            service_fee_percent: input.service_fee_percent,
        }
    }
}

impl CatalogEntity for Area {
    type Input = AreaInput;

    fn validate(input: &Self::Input) -> AppResult<()> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_i64_range(input.sort_order, "sort_order", 0, i64::MAX)
    }

    fn check_references(txn: &TenantTxn<'_>, input: &Self::Input) -> AppResult<()> {
        ensure_exists::<Unit>(txn, "unit_id", input.unit_id)
    }

    fn build(id: u64, tenant: &TenantId, input: Self::Input) -> Self {
        Area {
            id,
            tenant_id: tenant.to_string(),
            unit_id: input.unit_id,
            name: input.name,
            sort_order: input.sort_order,
        }
    }
}

impl CatalogEntity for User {
    type Input = UserInput;

    fn validate(input: &Self::Input) -> AppResult<()> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_text_len(&input.email, "email", MIN_EMAIL_LEN, MAX_EMAIL_LEN)?;
        validate_required_text(&input.roles, "roles", MAX_ROLES_LEN)
    }

    fn build(id: u64, tenant: &TenantId, input: Self::Input) -> Self {
        User {
            id,
            tenant_id: tenant.to_string(),
            name: input.name,
            email: input.email,
            status: input.status,
            roles: input.roles,
        }
    }
}

impl CatalogEntity for DiningTable {
    type Input = DiningTableInput;

    fn validate(input: &Self::Input) -> AppResult<()> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_i64_range(input.capacity, "capacity", 1, MAX_TABLE_CAPACITY)
    }

    fn check_references(txn: &TenantTxn<'_>, input: &Self::Input) -> AppResult<()> {
        ensure_exists::<Unit>(txn, "unit_id", input.unit_id)?;
        ensure_exists::<Area>(txn, "area_id", input.area_id)
    }

    fn build(id: u64, tenant: &TenantId, input: Self::Input) -> Self {
        DiningTable {
            id,
            tenant_id: tenant.to_string(),
            unit_id: input.unit_id,
            area_id: input.area_id,
            name: input.name,
            capacity: input.capacity,
            status: input.status,
        }
    }
}
