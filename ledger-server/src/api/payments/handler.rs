//! Payment API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{CreatePaymentRequest, ItemList, Payment};

use crate::api::{AppJson, AppPath, blocking};
use crate::core::ServerState;
use crate::tenant::TenantId;
use crate::utils::AppResult;

/// GET /payments - 获取所有付款
pub async fn list(
    tenant: TenantId,
    State(state): State<ServerState>,
) -> AppResult<Json<ItemList<Payment>>> {
    let ledger = state.ledger.clone();
    let payments = blocking(move || Ok(ledger.list::<Payment>(&tenant)?)).await?;
    Ok(Json(payments.into()))
}

/// GET /payments/{id} - 获取付款
pub async fn get_by_id(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(id): AppPath<u64>,
) -> AppResult<Json<Payment>> {
    let ledger = state.ledger.clone();
    let payment = blocking(move || Ok(ledger.get::<Payment>(&tenant, id)?)).await?;
    Ok(Json(payment))
}

/// POST /payments - 登记待确认付款
pub async fn create(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CreatePaymentRequest>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let ledger = state.ledger.clone();
    let payment = blocking(move || Ok(ledger.create_payment(&tenant, payload)?)).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// POST /payments/{id}/confirm - 确认付款
pub async fn confirm(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(id): AppPath<u64>,
) -> AppResult<Json<Payment>> {
    let ledger = state.ledger.clone();
    let payment = blocking(move || Ok(ledger.confirm_payment(&tenant, id)?)).await?;
    Ok(Json(payment))
}
