//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 租户 |
//! |------|------|------|------|
//! | /health | GET | 简单健康检查 | 无 |

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需租户)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 简单健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态
    status: &'static str,
}

/// GET /health - 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
