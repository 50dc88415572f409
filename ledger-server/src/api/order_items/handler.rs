//! Order Item API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{AddItemRequest, ItemList, OrderItem};

use crate::api::{AppJson, AppPath, blocking};
use crate::core::ServerState;
use crate::tenant::TenantId;
use crate::utils::AppResult;

/// GET /order-items - 获取所有订单项
pub async fn list(
    tenant: TenantId,
    State(state): State<ServerState>,
) -> AppResult<Json<ItemList<OrderItem>>> {
    let ledger = state.ledger.clone();
    let items = blocking(move || Ok(ledger.list::<OrderItem>(&tenant)?)).await?;
    Ok(Json(items.into()))
}

/// GET /order-items/{id} - 获取订单项
pub async fn get_by_id(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(id): AppPath<u64>,
) -> AppResult<Json<OrderItem>> {
    let ledger = state.ledger.clone();
    let item = blocking(move || Ok(ledger.get::<OrderItem>(&tenant, id)?)).await?;
    Ok(Json(item))
}

/// POST /order-items - 向草稿订单加菜 (快照商品名与单价)
pub async fn create(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppJson(payload): AppJson<AddItemRequest>,
) -> AppResult<(StatusCode, Json<OrderItem>)> {
    let ledger = state.ledger.clone();
    let item = blocking(move || Ok(ledger.add_item(&tenant, payload)?)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// POST /order-items/{id}/void - 作废已送出的订单项
pub async fn void(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(id): AppPath<u64>,
) -> AppResult<Json<OrderItem>> {
    let ledger = state.ledger.clone();
    let item = blocking(move || Ok(ledger.void_item(&tenant, id)?)).await?;
    Ok(Json(item))
}
