//! Catalog API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value;

use crate::api::extract::parse_id;
use crate::api::{AppJson, AppPath, blocking};
use crate::catalog::CatalogKind;
use crate::core::ServerState;
use crate::tenant::TenantId;
use crate::utils::AppResult;

/// GET /{entity} - 获取全部记录
pub async fn list(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(entity): AppPath<String>,
) -> AppResult<Json<Value>> {
    let kind = CatalogKind::from_path(&entity)?;
    let catalog = state.catalog.clone();
    let rows = blocking(move || catalog.list_json(kind, &tenant)).await?;
    Ok(Json(rows))
}

/// GET /{entity}/{id} - 获取单条记录
pub async fn get_by_id(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath((entity, id)): AppPath<(String, String)>,
) -> AppResult<Json<Value>> {
    let kind = CatalogKind::from_path(&entity)?;
    let id = parse_id(&id)?;
    let catalog = state.catalog.clone();
    let row = blocking(move || catalog.get_json(kind, &tenant, id)).await?;
    Ok(Json(row))
}

/// POST /{entity} - 创建记录
pub async fn create(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath(entity): AppPath<String>,
    AppJson(payload): AppJson<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let kind = CatalogKind::from_path(&entity)?;
    let catalog = state.catalog.clone();
    let row = blocking(move || catalog.create_json(kind, &tenant, payload)).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /{entity}/{id} - 整体替换记录
pub async fn update(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath((entity, id)): AppPath<(String, String)>,
    AppJson(payload): AppJson<Value>,
) -> AppResult<Json<Value>> {
    let kind = CatalogKind::from_path(&entity)?;
    let id = parse_id(&id)?;
    let catalog = state.catalog.clone();
    let row = blocking(move || catalog.update_json(kind, &tenant, id, payload)).await?;
    Ok(Json(row))
}

/// DELETE /{entity}/{id} - 删除记录 (不级联)
pub async fn delete(
    tenant: TenantId,
    State(state): State<ServerState>,
    AppPath((entity, id)): AppPath<(String, String)>,
) -> AppResult<StatusCode> {
    let kind = CatalogKind::from_path(&entity)?;
    let id = parse_id(&id)?;
    let catalog = state.catalog.clone();
    blocking(move || catalog.delete_kind(kind, &tenant, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
