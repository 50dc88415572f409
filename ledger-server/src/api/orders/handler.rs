//! Order API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{CreateOrderRequest, ItemList, Order};

use crate::api::{AppJson, AppPath, blocking};
use crate::core::ServerState;
use crate::tenant::TenantId;
use crate::utils::AppResult;

/// GET /orders - 获取所有订单
pub async fn list(
    tenant: TenantId,
    State(state): State<ServerState>,
) -> AppResult<Json<ItemList<Order>>> {
    let ledger = state.ledger.clone();
    let orders = blocking(move || Ok(ledger.list::<Order>(&tenant)?)).await?;
    Ok(Json(orders.into()))
}

/// GET /orders/{id} - 获取订单
pub async fn get_by_id(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(id): AppPath<u64>,
) -> AppResult<Json<Order>> {
    let ledger = state.ledger.clone();
    let order = blocking(move || Ok(ledger.get::<Order>(&tenant, id)?)).await?;
    Ok(Json(order))
}

/// POST /orders - 创建草稿订单
pub async fn create(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let ledger = state.ledger.clone();
    let order = blocking(move || Ok(ledger.create_order(&tenant, payload)?)).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// POST /orders/{id}/send - 送单 (草稿 → 已送出)
pub async fn send(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(id): AppPath<u64>,
) -> AppResult<Json<Order>> {
    let ledger = state.ledger.clone();
    let order = blocking(move || Ok(ledger.send_order(&tenant, id)?)).await?;
    Ok(Json(order))
}
