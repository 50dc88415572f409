//! 请求截止时间
//!
//! 请求进入时记录截止时刻，处理器通过 [`crate::api::blocking`] 把它带到
//! 存储线程；超时的写事务在提交前回滚并返回 408，不会出现
//! "客户端收到超时、数据却已写入" 的情况。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};

tokio::task_local! {
    static DEADLINE: Option<Instant>;
}

/// 为请求设置截止时间 (`REQUEST_TIMEOUT_MS`)
pub async fn deadline_middleware(
    State(limit): State<Duration>,
    req: Request,
    next: Next,
) -> Response {
    let deadline = Instant::now().checked_add(limit);
    DEADLINE.scope(deadline, next.run(req)).await
}

/// 当前请求的截止时间；中间件之外为 `None`
pub fn current_deadline() -> Option<Instant> {
    DEADLINE.try_with(|deadline| *deadline).ok().flatten()
}
