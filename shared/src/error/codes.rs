//! Machine-readable error codes for the ledger
//!
//! Every failure surfaced over HTTP carries exactly one of these codes in the
//! `error` field of the response body. Codes are grouped by category:
//! - General: request shape and input validation
//! - Tenant: tenant identification
//! - Catalog: reference data lookups and foreign keys
//! - Ledger: tab / order / item state transitions
//! - Payment: payment amount checks
//! - System: storage and internal failures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as the snake_case machine code (e.g. `"tab_already_open"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // ==================== General ====================
    /// Malformed body, unknown field or out-of-range value
    ValidationError,
    /// Route exists but not for this method
    MethodNotAllowed,
    /// Request ran past its deadline; nothing was committed
    RequestTimeout,

    // ==================== Tenant ====================
    /// Tenant header absent or unusable
    MissingTenant,

    // ==================== Catalog ====================
    /// Collection name is not a known entity kind
    EntityNotFound,
    /// Row does not exist for this tenant
    ResourceNotFound,
    /// Foreign key does not resolve within the tenant
    InvalidReference,

    // ==================== Ledger ====================
    /// Table already has an open tab
    TabAlreadyOpen,
    /// Tab is closed and cannot take orders or payments
    TabClosed,
    /// Tab is not open and cannot be closed
    TabNotOpen,
    /// Order was already sent
    OrderImmutable,
    /// Order has no active items
    OrderEmpty,
    /// Transition not legal from the current state
    InvalidState,
    /// Tab still has draft orders
    PendingOrders,
    /// Tab still has an amount due
    AmountDue,

    // ==================== Payment ====================
    /// Payment amount exceeds the tab's due amount
    PaymentExceedsDue,

    // ==================== System ====================
    /// Storage or internal failure
    InternalError,
}

impl ErrorCode {
    /// Machine code as sent on the wire
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::MethodNotAllowed => "method_not_allowed",
            ErrorCode::RequestTimeout => "request_timeout",
            ErrorCode::MissingTenant => "missing_tenant",
            ErrorCode::EntityNotFound => "entity_not_found",
            ErrorCode::ResourceNotFound => "resource_not_found",
            ErrorCode::InvalidReference => "invalid_reference",
            ErrorCode::TabAlreadyOpen => "tab_already_open",
            ErrorCode::TabClosed => "tab_closed",
            ErrorCode::TabNotOpen => "tab_not_open",
            ErrorCode::OrderImmutable => "order_immutable",
            ErrorCode::OrderEmpty => "order_empty",
            ErrorCode::InvalidState => "invalid_state",
            ErrorCode::PendingOrders => "pending_orders",
            ErrorCode::AmountDue => "amount_due",
            ErrorCode::PaymentExceedsDue => "payment_exceeds_due",
            ErrorCode::InternalError => "internal_error",
        }
    }

    /// Default human-readable detail for this code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::MethodNotAllowed => "Method not allowed",
            ErrorCode::RequestTimeout => "Request timed out",
            ErrorCode::MissingTenant => "Tenant header required",
            ErrorCode::EntityNotFound => "Unknown entity",
            ErrorCode::ResourceNotFound => "No resource for tenant",
            ErrorCode::InvalidReference => "Referenced resource not found",
            ErrorCode::TabAlreadyOpen => "Table already has an open tab",
            ErrorCode::TabClosed => "Tab is closed",
            ErrorCode::TabNotOpen => "Tab is not open",
            ErrorCode::OrderImmutable => "Only draft orders can be changed",
            ErrorCode::OrderEmpty => "Cannot send empty order",
            ErrorCode::InvalidState => "Operation not allowed in current state",
            ErrorCode::PendingOrders => "Tab has draft orders",
            ErrorCode::AmountDue => "Tab has remaining due amount",
            ErrorCode::PaymentExceedsDue => "Amount exceeds due amount",
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
