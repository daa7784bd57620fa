//! Role-gate middleware
//!
//! Wraps staff/admin-only routers. Unauthenticated viewers get a 401
//! with a sign-in redirect hint; authenticated viewers with an
//! insufficient role get a 403 access-denied response with a link
//! home. Admin implies all staff capabilities.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::models::StaffRole;
use crate::security_log;
use crate::utils::AppError;

async fn gate(
    state: ServerState,
    mut req: Request,
    next: Next,
    required: StaffRole,
) -> Result<Response, AppError> {
    // CORS preflight never carries credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or(AppError::InvalidToken)?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::Unauthorized);
        }
    };

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{}", e),
            uri = format!("{:?}", req.uri())
        );
        match e {
            crate::auth::JwtError::ExpiredToken => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    })?;

    let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;

    if !user.role.covers(required) {
        security_log!(
            "WARN",
            "role_denied",
            user = user.username.clone(),
            required = required.as_str()
        );
        return Err(AppError::forbidden(format!(
            "{required} access required"
        )));
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require a signed-in user with at least the staff role.
pub async fn require_staff(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate(state, req, next, StaffRole::Staff).await
}

/// Require a signed-in admin.
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate(state, req, next, StaffRole::Admin).await
}
