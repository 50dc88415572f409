//! Tab API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{ItemList, OpenTabRequest, Tab};

use crate::api::{AppJson, AppPath, blocking};
use crate::core::ServerState;
use crate::tenant::TenantId;
use crate::utils::AppResult;

/// GET /tabs - 获取所有账单
pub async fn list(
    tenant: TenantId,
    State(state): State<ServerState>,
) -> AppResult<Json<ItemList<Tab>>> {
    let ledger = state.ledger.clone();
    let tabs = blocking(move || Ok(ledger.list::<Tab>(&tenant)?)).await?;
    Ok(Json(tabs.into()))
}

/// GET /tabs/{id} - 获取账单 (最近一次重算的快照)
pub async fn get_by_id(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(id): AppPath<u64>,
) -> AppResult<Json<Tab>> {
    let ledger = state.ledger.clone();
    let tab = blocking(move || Ok(ledger.get::<Tab>(&tenant, id)?)).await?;
    Ok(Json(tab))
}

/// POST /tabs/open - 开台
pub async fn open(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppJson(payload): AppJson<OpenTabRequest>,
) -> AppResult<(StatusCode, Json<Tab>)> {
    let ledger = state.ledger.clone();
    let tab = blocking(move || Ok(ledger.open_tab(&tenant, payload)?)).await?;
    Ok((StatusCode::CREATED, Json(tab)))
}

/// POST /tabs/{id}/recalculate - 重算账单
pub async fn recalculate(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(id): AppPath<u64>,
) -> AppResult<Json<Tab>> {
    let ledger = state.ledger.clone();
    let tab = blocking(move || Ok(ledger.recalculate_tab(&tenant, id)?)).await?;
    Ok(Json(tab))
}

/// POST /tabs/{id}/close - 结账
pub async fn close(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(id): AppPath<u64>,
) -> AppResult<Json<Tab>> {
    let ledger = state.ledger.clone();
    let tab = blocking(move || Ok(ledger.close_tab(&tenant, id)?)).await?;
    Ok(Json(tab))
}
