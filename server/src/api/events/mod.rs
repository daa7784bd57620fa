//! Realtime WebSocket routes
//!
//! Pushes [`shared::event::OrderEvent`] JSON frames to open views.
//! Café-wide stream for kitchen/admin screens, table-scoped stream
//! for a customer's tracking view. Unauthenticated by design: events
//! carry no more than the public tracking endpoints already expose.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cafes/{slug}/events/ws", get(handler::cafe_events))
        .route(
            "/api/cafes/{slug}/tables/{table}/events/ws",
            get(handler::table_events),
        )
}
