//! Unit Model
//!
//! A unit is one physical venue of a tenant. It owns the service fee policy
//! applied to every tab opened under it.

use serde::{Deserialize, Serialize};

/// Unit entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u64,
    pub tenant_id: String,
    pub name: String,
    pub timezone: String,
    pub service_fee_enabled: bool,
    /// Percentage in `0..=100`
    pub service_fee_percent: f64,
}

/// Create / replace unit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitInput {
    pub name: String,
    pub timezone: String,
    #[serde(default)]
    pub service_fee_enabled: bool,
    #[serde(default)]
    pub service_fee_percent: f64,
}
