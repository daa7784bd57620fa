//! API routes
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - staff sign-in
//! - [`cafes`] - public tenant routes (menu, page, ordering, tracking)
//! - [`events`] - realtime WebSocket streams
//! - [`staff`] - kitchen/order management (staff gate)
//! - [`admin`] - menu, website editor, roles (admin gate)

pub mod convert;

pub mod admin;
pub mod auth;
pub mod cafes;
pub mod events;
pub mod health;
pub mod staff;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::ServerState;

/// HTTP access log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());
    response
}

/// Build the full application router.
pub fn router(state: ServerState) -> Router {
    Router::<ServerState>::new()
        // Public surface
        .merge(health::router())
        .merge(auth::router())
        .merge(cafes::router())
        .merge(events::router())
        // Gated surfaces carry their own role middleware
        .merge(staff::router(state.clone()))
        .merge(admin::router(state.clone()))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
