//! Authentication middleware
//!
//! Admin gate for staff routes: extracts and validates the JWT from the
//! `Authorization: Bearer <token>` header, checks the admin role, and
//! injects [`CurrentUser`] into request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use shared::error::{AppError, ErrorCode};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;

/// Admin middleware - requires a valid token with the admin role
///
/// | Failure | HTTP status |
/// |---------|-------------|
/// | No Authorization header | 401 Unauthorized |
/// | Expired token | 401 TokenExpired |
/// | Invalid token | 401 TokenInvalid |
/// | Non-admin role | 403 AdminRequired |
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(uri = %req.uri(), "Missing authorization header on admin route");
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            if !user.is_admin() {
                tracing::warn!(
                    username = %user.username,
                    role = %user.role,
                    "Admin route denied for non-admin user"
                );
                return Err(AppError::new(ErrorCode::AdminRequired));
            }
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "Admin authentication failed");
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
