//! Typed rows stored in the tenant store

use serde::{Serialize, de::DeserializeOwned};
use shared::models::{
    Area, Category, DiningTable, Order, OrderItem, Payment, Product, Tab, Unit, User,
};
use std::fmt;

/// Closed set of persisted entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Category,
    Product,
    Unit,
    Area,
    User,
    DiningTable,
    Tab,
    Order,
    OrderItem,
    Payment,
}

impl EntityKind {
    /// Key segment used in the `rows` and `sequences` tables
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Product => "product",
            EntityKind::Unit => "unit",
            EntityKind::Area => "area",
            EntityKind::User => "user",
            EntityKind::DiningTable => "dining_table",
            EntityKind::Tab => "tab",
            EntityKind::Order => "order",
            EntityKind::OrderItem => "order_item",
            EntityKind::Payment => "payment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row that can be persisted in a tenant partition
pub trait Record: Serialize + DeserializeOwned + Send + 'static {
    const KIND: EntityKind;

    fn id(&self) -> u64;
}

macro_rules! impl_record {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn id(&self) -> u64 {
                    self.id
                }
            }
        )*
    };
}

impl_record! {
    Category => Category,
    Product => Product,
    Unit => Unit,
    Area => Area,
    User => User,
    DiningTable => DiningTable,
    Tab => Tab,
    Order => Order,
    OrderItem => OrderItem,
    Payment => Payment,
}
