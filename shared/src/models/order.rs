//! Order Model

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    Sent,
}

/// A batch of items submitted to the kitchen together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub tenant_id: String,
    pub tab_id: u64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub sent_at: Option<i64>,
}

/// `POST /orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateOrderRequest {
    pub tab_id: u64,
}
