//! Payment Model

use serde::{Deserialize, Serialize};

/// Tender type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
}

/// Payment status
///
/// Confirmation is a local transition; no gateway is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// Payment against a tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub tenant_id: String,
    pub tab_id: u64,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: Option<i64>,
}

/// `POST /payments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePaymentRequest {
    pub tab_id: u64,
    pub amount: f64,
    pub method: PaymentMethod,
}
