//! QR image serving module
//!
//! Only used without S3: serves the PNG files written under
//! `work_dir/qrcodes`. With S3 configured, clients get presigned URLs from
//! `/api/locations/:id/qr` and this route never sees traffic.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/qr/{filename}", get(handler::qr_image))
}
