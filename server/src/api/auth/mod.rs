//! Authentication routes
//!
//! - POST /api/auth/login: public
//! - GET /api/auth/me: requires a valid token (extractor-gated)

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me))
}
