//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `price` may change at any time; order items keep their own snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub tenant_id: String,
    pub name: String,
    pub price: f64,
    pub category_id: u64,
}

/// Create / replace product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub category_id: u64,
}
