//! Locations API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use shared::error::AppResult;
use shared::models::{Location, LocationCreate, LocationSummary, QueueEntry, QueueStats};

use crate::core::ServerState;

/// GET /api/locations - list all locations
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<LocationSummary>>> {
    let locations = state.manager.list_locations().await?;
    Ok(Json(locations.iter().map(LocationSummary::from).collect()))
}

/// GET /api/locations/:id - location detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Location>> {
    let location = state.manager.get_location(&id).await?;
    Ok(Json(location))
}

/// GET /api/locations/:id/stats - live queue statistics
pub async fn stats(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<QueueStats>> {
    let stats = state.manager.stats(&id).await?;
    Ok(Json(stats))
}

/// QR link pair for a location
#[derive(Debug, Serialize)]
pub struct QrLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,
}

/// GET /api/locations/:id/qr - fetchable URLs for the location's QR codes
///
/// Presigned S3 URLs when S3 is configured, local serving routes otherwise.
/// Fields are absent when QR generation failed at creation time.
pub async fn qr_links(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<QrLinks>> {
    let location = state.manager.get_location(&id).await?;

    let join_url = match &location.join_qr {
        Some(filename) => Some(state.qr.url_for(filename).await?),
        None => None,
    };
    let status_url = match &location.status_qr {
        Some(filename) => Some(state.qr.url_for(filename).await?),
        None => None,
    };

    Ok(Json(QrLinks {
        join_url,
        status_url,
    }))
}

/// POST /api/locations - create a location (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LocationCreate>,
) -> AppResult<Json<Location>> {
    let location = state.manager.create_location(payload).await?;
    Ok(Json(location))
}

/// DELETE /api/locations/:id - delete a location and its history (admin)
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.manager.delete_location(&id).await?;
    Ok(Json(true))
}

/// GET /api/locations/:id/queue - waiting entries in position order (admin)
pub async fn waiting_list(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<QueueEntry>>> {
    let waiting = state.manager.waiting_list(&id).await?;
    Ok(Json(waiting))
}

/// Serve-next result
#[derive(Debug, Serialize)]
pub struct ServeResult {
    /// The served entry, or null when nobody was waiting
    pub served: Option<QueueEntry>,
}

/// POST /api/locations/:id/serve - serve the next waiting visitor (admin)
pub async fn serve(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ServeResult>> {
    let served = state.manager.serve_next(&id).await?;
    Ok(Json(ServeResult { served }))
}
