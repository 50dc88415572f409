//! Unified error system for the ledger
//!
//! - [`ErrorCode`]: machine codes carried in the `error` field of every failure body
//! - [`ErrorCategory`]: grouping of codes by domain
//! - [`AppError`]: code plus human-readable detail, convertible into an HTTP response
//! - [`ErrorBody`]: the `{"error": ..., "detail": ...}` wire shape
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::TabAlreadyOpen);
//! assert_eq!(err.http_status().as_u16(), 409);
//!
//! let err = AppError::with_message(ErrorCode::OrderImmutable, "Order already sent");
//! assert_eq!(err.code.as_str(), "order_immutable");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{AppError, AppResult, ErrorBody};
