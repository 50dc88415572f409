//! Payment API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/payments", get(handler::list).post(handler::create))
        .route("/payments/{id}", get(handler::get_by_id))
        .route("/payments/{id}/confirm", post(handler::confirm))
}
