//! Auth API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use shared::error::{AppError, AppResult};

use crate::core::ServerState;

/// Login payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// POST /api/auth/login - admin login
///
/// A single error for bad username or bad password, to avoid confirming
/// which one was wrong.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if !state.credentials.verify(&payload.username, &payload.password) {
        tracing::warn!(username = %payload.username, "Failed admin login attempt");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(state.credentials.username(), state.credentials.username(), "admin")
        .map_err(|e| AppError::internal(e.to_string()))?;

    tracing::info!(username = %payload.username, "Admin logged in");
    Ok(Json(LoginResponse {
        token,
        expires_in: state.jwt_service.expires_in_seconds(),
    }))
}
