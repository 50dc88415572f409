use crate::store::StorageError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(String),

    #[error("Table {0} already has an open tab")]
    TabAlreadyOpen(u64),

    #[error("Tab {0} is closed")]
    TabClosed(u64),

    #[error("Tab {0} is not open")]
    TabNotOpen(u64),

    #[error("{0}")]
    OrderImmutable(String),

    #[error("Cannot send empty order {0}")]
    OrderEmpty(u64),

    #[error("{0}")]
    InvalidState(String),

    #[error("Tab {0} has draft orders")]
    PendingOrders(u64),

    #[error("Tab {tab_id} has remaining due amount {due:.2}")]
    AmountDue { tab_id: u64, due: f64 },

    #[error("Amount {amount:.2} exceeds due amount {due:.2}")]
    PaymentExceedsDue { amount: f64, due: f64 },
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::Storage(StorageError::NotFound(..)) => ErrorCode::ResourceNotFound,
            LedgerError::Storage(StorageError::DeadlineExceeded) => ErrorCode::RequestTimeout,
            LedgerError::Storage(_) => ErrorCode::InternalError,
            LedgerError::Validation(_) => ErrorCode::ValidationError,
            LedgerError::TabAlreadyOpen(_) => ErrorCode::TabAlreadyOpen,
            LedgerError::TabClosed(_) => ErrorCode::TabClosed,
            LedgerError::TabNotOpen(_) => ErrorCode::TabNotOpen,
            LedgerError::OrderImmutable(_) => ErrorCode::OrderImmutable,
            LedgerError::OrderEmpty(_) => ErrorCode::OrderEmpty,
            LedgerError::InvalidState(_) => ErrorCode::InvalidState,
            LedgerError::PendingOrders(_) => ErrorCode::PendingOrders,
            LedgerError::AmountDue { .. } => ErrorCode::AmountDue,
            LedgerError::PaymentExceedsDue { .. } => ErrorCode::PaymentExceedsDue,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Storage(e) => e.into(),
            other => AppError::with_message(other.code(), other.to_string()),
        }
    }
}
