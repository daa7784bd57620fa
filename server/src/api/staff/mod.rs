//! Staff routes
//!
//! Kitchen display and order management. Gated by [`require_staff`],
//! which admins pass as well; the tenant comes from the token, never
//! from the URL.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new()
        .nest("/api/staff", routes())
        .route_layer(middleware::from_fn_with_state(state, require_staff))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::list_orders))
        .route("/orders/{id}", get(handler::get_order))
        .route("/orders/{id}/advance", post(handler::advance_order))
        .route("/orders/{id}/status", put(handler::set_order_status))
        .route("/orders/{id}/ready-link", get(handler::ready_link))
        .route("/qr-links", get(handler::qr_links))
}
