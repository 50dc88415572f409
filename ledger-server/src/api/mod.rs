//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`catalog`] - 目录通用 CRUD (`/{entity}`)
//! - [`tabs`] - 账单开台、重算、结账
//! - [`orders`] - 订单创建、送单
//! - [`order_items`] - 订单项添加、作废
//! - [`payments`] - 付款登记、确认
//!
//! 所有租户接口的第一个提取器都是 [`TenantId`](crate::tenant::TenantId)。

pub mod extract;

pub mod catalog;
pub mod health;
pub mod order_items;
pub mod orders;
pub mod payments;
pub mod tabs;

use axum::Router;
use axum::http::{Method, Uri};
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::middleware;
use crate::store;
use crate::utils::{AppError, AppResult, ErrorCode};

pub use extract::{AppJson, AppPath};

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - no tenant
        .merge(health::router())
        // Ledger API - static paths win over the catalog capture
        .merge(tabs::router())
        .merge(orders::router())
        .merge(order_items::router())
        .merge(payments::router())
        // Catalog API - /{entity}
        .merge(catalog::router())
        .fallback(fallback)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Build a fully configured application with all middleware
///
/// Used by both the HTTP server and the integration tests.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    let request_timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_router()
        // Deadline - storage work past the limit aborts before commit (408)
        .layer(axum_middleware::from_fn_with_state(
            request_timeout,
            middleware::deadline_middleware,
        ))
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging - sees the request id set below
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
}

async fn fallback(uri: Uri) -> AppError {
    AppError::with_message(
        ErrorCode::ResourceNotFound,
        format!("No route for {}", uri.path()),
    )
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::with_message(
        ErrorCode::MethodNotAllowed,
        format!("{method} not allowed on {}", uri.path()),
    )
}

/// Run a storage-bound operation on the blocking pool
///
/// The closure owns everything it touches, so a client that disconnects
/// mid-request cannot interrupt a transaction between check and commit.
/// The request deadline travels with it; the outcome is always awaited, so
/// the response reports whether the write was committed.
pub(crate) async fn blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let deadline = middleware::current_deadline();
    tokio::task::spawn_blocking(move || store::with_deadline(deadline, f))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Blocking task failed");
            AppError::internal("Blocking task failed")
        })?
}
