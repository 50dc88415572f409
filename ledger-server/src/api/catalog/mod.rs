//! Catalog API 模块
//!
//! `{entity}` ∈ categories | products | units | areas | users | tables

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/{entity}", get(handler::list).post(handler::create))
        .route(
            "/{entity}/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
