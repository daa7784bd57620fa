//! Public café routes
//!
//! Everything under /api/cafes/{slug} is unauthenticated: the menu,
//! the rendered landing page, order placement from a table, and
//! per-table order tracking.

mod handler;

pub(crate) use handler::resolve as resolve_public;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cafes/{slug}", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::cafe_info))
        .route("/menu", get(handler::menu))
        .route("/categories", get(handler::categories))
        .route("/website", get(handler::website))
        .route("/page", get(handler::page))
        .route("/orders", post(handler::place_order))
        .route("/orders/{id}", get(handler::track_order))
        .route("/tables/{table}/orders", get(handler::table_orders))
}
