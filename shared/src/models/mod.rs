//! Data models
//!
//! Row types are what the server persists and returns. `*Input` / `*Request`
//! types are request bodies and reject unknown fields.
//! All ids are `u64`, unique per entity kind.

pub mod area;
pub mod category;
pub mod dining_table;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod tab;
pub mod unit;
pub mod user;

// Re-exports
pub use area::*;
pub use category::*;
pub use dining_table::*;
pub use order::*;
pub use order_item::*;
pub use payment::*;
pub use product::*;
pub use tab::*;
pub use unit::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// List response body: `{"items": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for ItemList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}
