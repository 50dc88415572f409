//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Floor status of a table
///
/// Maintained by the catalog only; opening or closing a tab does not touch it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: u64,
    pub tenant_id: String,
    pub unit_id: u64,
    pub area_id: u64,
    pub name: String,
    pub capacity: i64,
    pub status: TableStatus,
}

/// Create / replace dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiningTableInput {
    pub unit_id: u64,
    pub area_id: u64,
    pub name: String,
    pub capacity: i64,
    #[serde(default)]
    pub status: TableStatus,
}
