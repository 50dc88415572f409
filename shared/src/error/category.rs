//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification
///
/// Used to decide logging level and to group codes in the HTTP mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Input validation
    General,
    /// Tenant identification
    Tenant,
    /// Reference data lookups
    Catalog,
    /// Ledger state transitions
    Ledger,
    /// Payment checks
    Payment,
    /// Storage / internal failures
    System,
}

impl ErrorCategory {
    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Tenant => "tenant",
            Self::Catalog => "catalog",
            Self::Ledger => "ledger",
            Self::Payment => "payment",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError | Self::MethodNotAllowed | Self::RequestTimeout => {
                ErrorCategory::General
            }
            Self::MissingTenant => ErrorCategory::Tenant,
            Self::EntityNotFound | Self::ResourceNotFound | Self::InvalidReference => {
                ErrorCategory::Catalog
            }
            Self::TabAlreadyOpen
            | Self::TabClosed
            | Self::TabNotOpen
            | Self::OrderImmutable
            | Self::OrderEmpty
            | Self::InvalidState
            | Self::PendingOrders
            | Self::AmountDue => ErrorCategory::Ledger,
            Self::PaymentExceedsDue => ErrorCategory::Payment,
            Self::InternalError => ErrorCategory::System,
        }
    }
}
