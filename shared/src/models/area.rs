//! Area Model

use serde::{Deserialize, Serialize};

/// Area entity (a room or section inside a unit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: u64,
    pub tenant_id: String,
    pub unit_id: u64,
    pub name: String,
    pub sort_order: i64,
}

/// Create / replace area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaInput {
    pub unit_id: u64,
    pub name: String,
    #[serde(default)]
    pub sort_order: i64,
}
