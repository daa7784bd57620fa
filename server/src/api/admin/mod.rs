//! Admin routes
//!
//! Menu and category management, the website editor, and role
//! assignment. Gated by [`require_admin`]; staff tokens get a 403.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new()
        .nest("/api/admin", routes())
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/menu-items",
            get(handler::list_menu_items).post(handler::create_menu_item),
        )
        .route(
            "/menu-items/{id}",
            put(handler::update_menu_item).delete(handler::delete_menu_item),
        )
        .route(
            "/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route(
            "/categories/{id}",
            put(handler::update_category).delete(handler::delete_category),
        )
        .route(
            "/website",
            get(handler::get_website).put(handler::put_website),
        )
        .route("/users", get(handler::list_users))
        .route("/users/{id}/role", put(handler::set_user_role))
}
