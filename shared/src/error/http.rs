//! Status mapping
//!
//! Input problems are 400, missing rows 404, rejected ledger transitions 409.
//! A missed request deadline is 408.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;

        match self {
            ValidationError | MissingTenant | InvalidReference => StatusCode::BAD_REQUEST,
            EntityNotFound | ResourceNotFound => StatusCode::NOT_FOUND,
            MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            TabAlreadyOpen | TabClosed | TabNotOpen | OrderImmutable | OrderEmpty
            | InvalidState | PendingOrders | AmountDue | PaymentExceedsDue => {
                StatusCode::CONFLICT
            }
            InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
