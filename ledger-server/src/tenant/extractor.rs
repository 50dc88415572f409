//! Tenant extractor
//!
//! Reads the tenant header before any other handler argument is parsed, so
//! a request without a tenant fails with `missing_tenant` first.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::{AppError, ErrorCode};

use super::TenantId;

/// Header carrying the tenant identifier
pub const TENANT_HEADER: &str = "X-Tenant-ID";

impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Check if already extracted
        if let Some(tenant) = parts.extensions.get::<TenantId>() {
            return Ok(tenant.clone());
        }

        let raw = match parts.headers.get(TENANT_HEADER) {
            Some(value) => value.to_str().map_err(|_| {
                AppError::with_message(
                    ErrorCode::MissingTenant,
                    format!("{TENANT_HEADER} must be visible ASCII"),
                )
            })?,
            None => {
                tracing::debug!(uri = %parts.uri, "Request without tenant header");
                return Err(AppError::with_message(
                    ErrorCode::MissingTenant,
                    format!("{TENANT_HEADER} header required"),
                ));
            }
        };

        let tenant = TenantId::parse(raw)?;
        parts.extensions.insert(tenant.clone());
        Ok(tenant)
    }
}
