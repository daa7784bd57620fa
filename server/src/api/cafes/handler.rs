//! Public café handlers

use axum::{
    Json,
    extract::{Path, State},
    response::Html,
};
use serde::Serialize;
use shared::whatsapp::{self, OrderDetails};
use surrealdb::RecordId;

use crate::api::convert::{CafeDto, CategoryDto, MenuItemDto, OrderDto, WebsiteDto};
use crate::core::ServerState;
use crate::db::models::{Cafe, OrderCreate};
use crate::orders::OrderService;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use crate::website::{Block, Layout, render_page};

/// Resolve a public slug to the café row, 404 for unknown or
/// deactivated tenants.
pub(crate) async fn resolve(state: &ServerState, slug: &str) -> AppResult<(Cafe, RecordId)> {
    let cafe = state
        .cafes()
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cafe '{slug}' not found")))?;
    let id = cafe
        .id
        .clone()
        .ok_or_else(|| AppError::internal("cafe row without id"))?;
    Ok((cafe, id))
}

fn order_service(state: &ServerState) -> OrderService {
    OrderService::new(state.orders(), state.events.clone())
}

/// GET /api/cafes/{slug}
pub async fn cafe_info(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<CafeDto>>> {
    let (cafe, _) = resolve(&state, &slug).await?;
    Ok(ok(cafe.into()))
}

/// GET /api/cafes/{slug}/menu - available items only
pub async fn menu(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<Vec<MenuItemDto>>>> {
    let (_, cafe_id) = resolve(&state, &slug).await?;
    let items = state.menu_items().find_available(&cafe_id).await?;
    Ok(ok(items.into_iter().map(Into::into).collect()))
}

/// GET /api/cafes/{slug}/categories
pub async fn categories(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<Vec<CategoryDto>>>> {
    let (_, cafe_id) = resolve(&state, &slug).await?;
    let categories = state.categories().find_all(&cafe_id).await?;
    Ok(ok(categories.into_iter().map(Into::into).collect()))
}

/// GET /api/cafes/{slug}/website - raw page configuration
pub async fn website(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<WebsiteDto>>> {
    let (_, cafe_id) = resolve(&state, &slug).await?;
    let site = state
        .websites()
        .find_by_cafe(&cafe_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cafe '{slug}' has no website yet")))?;
    Ok(ok(site.into()))
}

/// GET /api/cafes/{slug}/page - rendered landing page
pub async fn page(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let (cafe, cafe_id) = resolve(&state, &slug).await?;
    let site = state
        .websites()
        .find_by_cafe(&cafe_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cafe '{slug}' has no website yet")))?;

    let layout = Layout::parse_or_default(&site.layout);
    let blocks: Vec<Block> = site
        .blocks
        .iter()
        .filter_map(|value| match Block::from_value(value) {
            Ok(block) => Some(block),
            Err(e) => {
                // a malformed stored block skips, the page still renders
                tracing::warn!(cafe = %slug, error = %e, "Skipping malformed block");
                None
            }
        })
        .collect();

    // a catalog failure hides menu previews, it never blanks the page
    let menu_items = match state.menu_items().find_available(&cafe_id).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(cafe = %slug, error = %e, "Menu fetch failed while rendering page");
            Vec::new()
        }
    };

    Ok(Html(render_page(&cafe, layout, &blocks, &menu_items)))
}

#[derive(Debug, Serialize)]
pub struct PlacedOrder {
    pub order: OrderDto,
    /// wa.me confirmation for the customer, when they left a number
    pub customer_whatsapp: Option<String>,
    /// wa.me new-order alert for the kitchen, when the café has one
    pub staff_whatsapp: Option<String>,
}

/// POST /api/cafes/{slug}/orders - place an order from a table
pub async fn place_order(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<AppResponse<PlacedOrder>>> {
    let (cafe, cafe_id) = resolve(&state, &slug).await?;
    let order = order_service(&state).create(&cafe_id, payload).await?;

    let details = OrderDetails {
        order_id: crate::db::models::id_string(&order.id),
        table_number: order.table_number.clone(),
        items: order.items.clone(),
        total_amount: order.total_amount,
        special_instructions: order.special_instructions.clone(),
    };
    let customer_whatsapp = order
        .customer_phone
        .as_deref()
        .map(|phone| whatsapp::customer_confirmation_link(&cafe.name, phone, &details));
    let staff_whatsapp = cafe
        .staff_phone
        .as_deref()
        .map(|phone| whatsapp::kitchen_alert_link(phone, &details));

    Ok(ok(PlacedOrder {
        order: order.into(),
        customer_whatsapp,
        staff_whatsapp,
    }))
}

/// GET /api/cafes/{slug}/orders/{id} - track one order
pub async fn track_order(
    State(state): State<ServerState>,
    Path((slug, id)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<OrderDto>>> {
    let (_, cafe_id) = resolve(&state, &slug).await?;
    let order = order_service(&state).get(&cafe_id, &id).await?;
    Ok(ok(order.into()))
}

/// GET /api/cafes/{slug}/tables/{table}/orders - track a table
pub async fn table_orders(
    State(state): State<ServerState>,
    Path((slug, table)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<Vec<OrderDto>>>> {
    let (_, cafe_id) = resolve(&state, &slug).await?;
    let orders = order_service(&state).track(&cafe_id, &table).await?;
    Ok(ok(orders.into_iter().map(Into::into).collect()))
}
