//! Admin handlers

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use surrealdb::RecordId;

use crate::api::convert::{CategoryDto, MenuItemDto, UserDto, WebsiteDto};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    CategoryCreate, CategoryUpdate, MenuItemCreate, MenuItemUpdate, StaffRole, WebsiteUpdate,
};
use crate::db::repository::parse_record_id;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message, validation};
use crate::website::{Layout, validate_blocks};

fn cafe_of(user: &CurrentUser) -> RecordId {
    parse_record_id("cafe", &user.cafe)
}

// ── Menu items ──────────────────────────────────────────────────────

/// GET /api/admin/menu-items - includes unavailable items
pub async fn list_menu_items(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<MenuItemDto>>>> {
    let items = state.menu_items().find_all(&cafe_of(&user)).await?;
    Ok(ok(items.into_iter().map(Into::into).collect()))
}

/// POST /api/admin/menu-items
pub async fn create_menu_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<AppResponse<MenuItemDto>>> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_optional_text(
        &payload.description,
        "description",
        validation::MAX_NOTE_LEN,
    )?;
    validation::validate_optional_text(&payload.image_url, "image_url", validation::MAX_URL_LEN)?;

    let item = state.menu_items().create(&cafe_of(&user), payload).await?;
    Ok(ok(item.into()))
}

/// PUT /api/admin/menu-items/{id}
pub async fn update_menu_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<AppResponse<MenuItemDto>>> {
    if let Some(ref name) = payload.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    validation::validate_optional_text(
        &payload.description,
        "description",
        validation::MAX_NOTE_LEN,
    )?;
    validation::validate_optional_text(&payload.image_url, "image_url", validation::MAX_URL_LEN)?;

    let item = state
        .menu_items()
        .update(&cafe_of(&user), &id, payload)
        .await?;
    Ok(ok(item.into()))
}

/// DELETE /api/admin/menu-items/{id}
pub async fn delete_menu_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = state.menu_items().delete(&cafe_of(&user), &id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Menu item {id} not found")));
    }
    Ok(ok_with_message(true, "Menu item deleted"))
}

// ── Categories ──────────────────────────────────────────────────────

/// GET /api/admin/categories
pub async fn list_categories(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<CategoryDto>>>> {
    let categories = state.categories().find_all(&cafe_of(&user)).await?;
    Ok(ok(categories.into_iter().map(Into::into).collect()))
}

/// POST /api/admin/categories
pub async fn create_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<AppResponse<CategoryDto>>> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    let category = state.categories().create(&cafe_of(&user), payload).await?;
    Ok(ok(category.into()))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<AppResponse<CategoryDto>>> {
    if let Some(ref name) = payload.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    let category = state
        .categories()
        .update(&cafe_of(&user), &id, payload)
        .await?;
    Ok(ok(category.into()))
}

/// DELETE /api/admin/categories/{id}
///
/// Refused while available menu items still reference the category.
pub async fn delete_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = state.categories().delete(&cafe_of(&user), &id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Category {id} not found")));
    }
    Ok(ok_with_message(true, "Category deleted"))
}

// ── Website editor ──────────────────────────────────────────────────

/// GET /api/admin/website
pub async fn get_website(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<WebsiteDto>>> {
    let site = state
        .websites()
        .find_by_cafe(&cafe_of(&user))
        .await?
        .ok_or_else(|| AppError::not_found("No website configured yet"))?;
    Ok(ok(site.into()))
}

/// PUT /api/admin/website - replace layout and blocks wholesale
///
/// Saving is strict where rendering is lenient: a known block kind
/// with a bad payload is rejected here, unknown kinds pass through
/// and survive the round trip.
pub async fn put_website(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<WebsiteUpdate>,
) -> AppResult<Json<AppResponse<WebsiteDto>>> {
    Layout::from_str(&payload.layout)
        .map_err(|_| AppError::validation(format!("Unknown layout '{}'", payload.layout)))?;
    validate_blocks(&payload.blocks)?;

    let site = state.websites().upsert(&cafe_of(&user), payload).await?;
    Ok(ok(site.into()))
}

// ── Roles ───────────────────────────────────────────────────────────

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<UserDto>>>> {
    let users = state.users().list(&cafe_of(&user)).await?;
    Ok(ok(users.into_iter().map(Into::into).collect()))
}

#[derive(Debug, serde::Deserialize)]
pub struct SetRoleRequest {
    pub role: StaffRole,
}

/// PUT /api/admin/users/{id}/role
///
/// One role per user; assigning replaces the old one. Admins cannot
/// demote themselves, which keeps every café with at least one admin.
pub async fn set_user_role(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<SetRoleRequest>,
) -> AppResult<Json<AppResponse<UserDto>>> {
    let target = parse_record_id("user", &id);
    if target.to_string() == user.id && payload.role != StaffRole::Admin {
        return Err(AppError::validation("You cannot demote your own account"));
    }

    let updated = state
        .users()
        .set_role(&cafe_of(&user), &id, payload.role)
        .await?;
    Ok(ok(updated.into()))
}
