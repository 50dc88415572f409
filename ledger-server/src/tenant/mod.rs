//! Tenant identification
//!
//! Every ledger and catalog operation runs against exactly one tenant. The
//! [`TenantId`] newtype is the only way to name a tenant partition in the
//! store, and it can only be built by [`TenantId::parse`] or by the request
//! extractor in [`extractor`].

mod extractor;

pub use extractor::TENANT_HEADER;

use shared::error::{AppError, ErrorCode};
use std::fmt;

/// Longest tenant identifier accepted
pub const MAX_TENANT_ID_LEN: usize = 64;

/// Opaque tenant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    /// Parse a raw header value
    ///
    /// Surrounding whitespace is trimmed. Empty, over-long and control
    /// character values are rejected with `missing_tenant`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::MissingTenant,
                format!("{TENANT_HEADER} header required"),
            ));
        }
        if value.chars().count() > MAX_TENANT_ID_LEN {
            return Err(AppError::with_message(
                ErrorCode::MissingTenant,
                format!("{TENANT_HEADER} must be at most {MAX_TENANT_ID_LEN} characters"),
            ));
        }
        if value.chars().any(char::is_control) {
            return Err(AppError::with_message(
                ErrorCode::MissingTenant,
                format!("{TENANT_HEADER} contains control characters"),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let tenant = TenantId::parse("  acme  ").unwrap();
        assert_eq!(tenant.as_str(), "acme");
    }

    #[test]
    fn test_parse_rejects_blank() {
        let err = TenantId::parse("   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingTenant);
        assert_eq!(err.message, "X-Tenant-ID header required");
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let raw = "t".repeat(MAX_TENANT_ID_LEN + 1);
        let err = TenantId::parse(&raw).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingTenant);

        let raw = "t".repeat(MAX_TENANT_ID_LEN);
        assert!(TenantId::parse(&raw).is_ok());
    }

    #[test]
    fn test_parse_rejects_control_chars() {
        assert!(TenantId::parse("ac\u{7}me").is_err());
    }
}
