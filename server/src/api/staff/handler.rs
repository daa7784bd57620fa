//! Staff handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::order::{OrderFilter, OrderStatus};
use shared::whatsapp;
use surrealdb::RecordId;

use crate::api::convert::OrderDto;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::parse_record_id;
use crate::orders::OrderService;
use crate::utils::{AppError, AppResponse, AppResult, ok};

fn cafe_of(user: &CurrentUser) -> RecordId {
    parse_record_id("cafe", &user.cafe)
}

fn order_service(state: &ServerState) -> OrderService {
    OrderService::new(state.orders(), state.events.clone())
}

/// GET /api/staff/orders?status=&window=&active=
///
/// `active=true` overrides any exact status and returns everything
/// not yet served; the window filters on placement time.
pub async fn list_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<AppResponse<Vec<OrderDto>>>> {
    let orders = order_service(&state).list(&cafe_of(&user), &filter).await?;
    Ok(ok(orders.into_iter().map(Into::into).collect()))
}

/// GET /api/staff/orders/{id}
pub async fn get_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<OrderDto>>> {
    let order = order_service(&state).get(&cafe_of(&user), &id).await?;
    Ok(ok(order.into()))
}

/// POST /api/staff/orders/{id}/advance - one step along the lifecycle
pub async fn advance_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<OrderDto>>> {
    let order = order_service(&state).advance(&cafe_of(&user), &id).await?;
    Ok(ok(order.into()))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

/// PUT /api/staff/orders/{id}/status - explicit set, backward allowed
pub async fn set_order_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<AppResponse<OrderDto>>> {
    let order = order_service(&state)
        .set_status(&cafe_of(&user), &id, payload.status)
        .await?;
    Ok(ok(order.into()))
}

#[derive(Debug, Serialize)]
pub struct ReadyLink {
    pub url: String,
}

/// GET /api/staff/orders/{id}/ready-link
///
/// wa.me "your order is ready" link for the customer who left a
/// phone number with the order.
pub async fn ready_link(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<ReadyLink>>> {
    let cafe_id = cafe_of(&user);
    let order = order_service(&state).get(&cafe_id, &id).await?;
    let phone = order
        .customer_phone
        .as_deref()
        .ok_or_else(|| AppError::validation("Order has no customer phone number"))?;

    let cafe = state
        .cafes()
        .find_by_id(&cafe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Cafe not found"))?;

    Ok(ok(ReadyLink {
        url: whatsapp::order_ready_link(&cafe.name, phone, &order.table_number),
    }))
}

#[derive(Debug, Deserialize)]
pub struct QrLinkQuery {
    /// Tables 1..=count get a link each
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct QrLink {
    pub table: String,
    pub url: String,
}

/// GET /api/staff/qr-links?count=12
///
/// Entry URLs to encode into printed table QR codes. The link lands
/// the customer on the café page with the table preselected.
pub async fn qr_links(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<QrLinkQuery>,
) -> AppResult<Json<AppResponse<Vec<QrLink>>>> {
    if query.count == 0 || query.count > 500 {
        return Err(AppError::validation("count must be between 1 and 500"));
    }
    let cafe_id = cafe_of(&user);
    let cafe = state
        .cafes()
        .find_by_id(&cafe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Cafe not found"))?;

    let base = state.config.public_base_url.trim_end_matches('/');
    let links = (1..=query.count)
        .map(|n| QrLink {
            table: n.to_string(),
            url: format!("{base}/{}?table={n}", cafe.slug),
        })
        .collect();
    Ok(ok(links))
}
