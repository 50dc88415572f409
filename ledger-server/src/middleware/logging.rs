//! 请求日志中间件
//!
//! 每个请求进入一个 `request` span (请求 ID、方法、路由模板、租户)，
//! 处理器内部的日志都会带上这些字段；结束时按状态码分级输出一条汇总。

use axum::{
    extract::{MatchedPath, Request},
    http::Method,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};

use crate::api::REQUEST_ID_HEADER;
use crate::tenant::TENANT_HEADER;

/// 从请求中提取的日志字段
struct RequestMeta {
    request_id: String,
    method: Method,
    route: String,
    tenant: String,
}

impl RequestMeta {
    fn capture(req: &Request) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        // 未匹配路由时退回原始路径
        let route = match req.extensions().get::<MatchedPath>() {
            Some(matched) => matched.as_str().to_string(),
            None => req.uri().path().to_string(),
        };

        Self {
            request_id: header(REQUEST_ID_HEADER)
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            method: req.method().clone(),
            route,
            tenant: header(TENANT_HEADER).unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// 请求日志中间件
///
/// 5xx 记为 warn，其余记为 info。
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let meta = RequestMeta::capture(&req);
    let span = info_span!(
        "request",
        request_id = %meta.request_id,
        method = %meta.method,
        route = %meta.route,
        tenant = %meta.tenant,
    );

    let started = Instant::now();
    let response = next.run(req).instrument(span.clone()).await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = response.status();

    span.in_scope(|| {
        if status.is_server_error() {
            warn!(status = status.as_u16(), latency_ms, "Request failed");
        } else if status.is_client_error() {
            info!(status = status.as_u16(), latency_ms, "Request rejected");
        } else {
            info!(status = status.as_u16(), latency_ms, "Request completed");
        }
    });

    response
}
