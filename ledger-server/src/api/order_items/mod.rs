//! Order Item API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/order-items", get(handler::list).post(handler::create))
        .route("/order-items/{id}", get(handler::get_by_id))
        .route("/order-items/{id}/void", post(handler::void))
}
