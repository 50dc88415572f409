//! Tab Model

use serde::{Deserialize, Serialize};

/// Tab lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabStatus {
    Open,
    Closed,
}

/// A running bill on one dining table
///
/// The five amount fields are the snapshot written by the last recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: u64,
    pub tenant_id: String,
    pub unit_id: u64,
    pub table_id: u64,
    pub status: TabStatus,
    pub opened_at: i64,
    pub closed_at: Option<i64>,
    pub subtotal_amount: f64,
    pub service_fee_amount: f64,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub due_amount: f64,
}

impl Tab {
    pub fn is_open(&self) -> bool {
        self.status == TabStatus::Open
    }
}

/// `POST /tabs/open`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenTabRequest {
    pub unit_id: u64,
    pub table_id: u64,
}
