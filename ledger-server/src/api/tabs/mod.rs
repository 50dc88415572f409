//! Tab API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/tabs", get(handler::list))
        .route("/tabs/open", post(handler::open))
        .route("/tabs/{id}", get(handler::get_by_id))
        .route("/tabs/{id}/recalculate", post(handler::recalculate))
        .route("/tabs/{id}/close", post(handler::close))
}
