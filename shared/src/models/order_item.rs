//! Order Item Model

use serde::{Deserialize, Serialize};

/// Line item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Active,
    Void,
}

/// Order line item
///
/// Name and price are copied from the product when the item is created and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u64,
    pub tenant_id: String,
    pub order_id: u64,
    pub product_id: u64,
    pub product_name_snapshot: String,
    pub unit_price_snapshot: f64,
    pub quantity: u32,
    pub status: ItemStatus,
    pub voided_at: Option<i64>,
}

/// `POST /order-items`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddItemRequest {
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: i64,
}
