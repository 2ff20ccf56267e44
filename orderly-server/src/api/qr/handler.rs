//! QR image serving handler

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use shared::error::{AppError, AppResult};

use crate::core::ServerState;

/// GET /api/qr/:filename - serve a locally stored QR code image
///
/// Filenames are `{location_id}_join.png` / `{location_id}_status.png`;
/// anything else is rejected before touching the filesystem.
pub async fn qr_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    let valid_name = (filename.ends_with("_join.png") || filename.ends_with("_status.png"))
        && filename
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid_name {
        return Err(AppError::invalid_request("Invalid QR filename"));
    }

    let bytes = state.qr.read_local(&filename).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}
