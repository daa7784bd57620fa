//! Authentication handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, verify_password};
use crate::core::ServerState;
use crate::db::models::id_string;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub cafe_slug: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub role: String,
    pub cafe_slug: String,
}

/// POST /api/auth/login
///
/// All failure paths return the same invalid-credentials message so
/// usernames cannot be enumerated.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    validation::validate_required_text(&payload.username, "username", validation::MAX_NAME_LEN)?;
    if payload.password.is_empty() || payload.password.len() > validation::MAX_PASSWORD_LEN {
        return Err(AppError::invalid_credentials());
    }

    let cafe = state
        .cafes()
        .find_by_slug(&payload.cafe_slug)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;
    let cafe_id = cafe
        .id
        .clone()
        .ok_or_else(|| AppError::internal("cafe row without id"))?;

    let user = state
        .users()
        .find_by_username(&cafe_id, &payload.username)
        .await?
        .ok_or_else(|| {
            security_log!(
                "WARN",
                "login_unknown_user",
                cafe = payload.cafe_slug.clone(),
                username = payload.username.clone()
            );
            AppError::invalid_credentials()
        })?;

    if !verify_password(&payload.password, &user.password_hash) {
        security_log!(
            "WARN",
            "login_bad_password",
            cafe = payload.cafe_slug.clone(),
            username = payload.username.clone()
        );
        return Err(AppError::invalid_credentials());
    }

    let user_id = id_string(&user.id);
    let token = state
        .jwt_service
        .generate_token(&user_id, &user.username, &cafe_id.to_string(), user.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    security_log!(
        "INFO",
        "login_success",
        cafe = payload.cafe_slug.clone(),
        username = user.username.clone()
    );

    Ok(ok(LoginResponse {
        token,
        user: SessionUser {
            id: user_id,
            username: user.username,
            role: user.role.as_str().to_string(),
            cafe_slug: cafe.slug,
        },
    }))
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> Json<AppResponse<serde_json::Value>> {
    ok(serde_json::json!({
        "id": user.id,
        "username": user.username,
        "role": user.role.as_str(),
        "cafe": user.cafe,
    }))
}
