//! Queue API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use shared::error::AppResult;
use shared::models::{JoinRequest, PositionInfo};

use crate::core::ServerState;
use crate::queue::WAIT_MINUTES_PER_PERSON;

/// Join confirmation shown to the visitor
///
/// The entry id is the visitor's only credential for later status checks
/// and leaving the queue.
#[derive(Debug, Serialize)]
pub struct JoinReceipt {
    pub entry_id: String,
    pub position: u32,
    /// Estimated wait in minutes
    pub estimated_wait: u32,
}

/// POST /api/queue/join - join the queue at a location
pub async fn join(
    State(state): State<ServerState>,
    Json(payload): Json<JoinRequest>,
) -> AppResult<Json<JoinReceipt>> {
    let entry = state.manager.join(payload).await?;
    Ok(Json(JoinReceipt {
        estimated_wait: entry.position * WAIT_MINUTES_PER_PERSON,
        position: entry.position,
        entry_id: entry.id,
    }))
}

/// GET /api/queue/:location_id/:entry_id - position lookup for a waiting entry
pub async fn position(
    State(state): State<ServerState>,
    Path((location_id, entry_id)): Path<(String, String)>,
) -> AppResult<Json<PositionInfo>> {
    let info = state.manager.position(&location_id, &entry_id).await?;
    Ok(Json(info))
}

/// POST /api/queue/:location_id/:entry_id/leave - leave the queue
pub async fn leave(
    State(state): State<ServerState>,
    Path((location_id, entry_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    state.manager.leave(&location_id, &entry_id).await?;
    Ok(Json(true))
}

/// Entry-id resolution result
#[derive(Debug, Serialize)]
pub struct ResolveResult {
    pub location_id: String,
}

/// GET /api/queue/resolve/:entry_id - recover the owning location from an
/// entry id (for visitors who saved only their id)
pub async fn resolve(
    State(state): State<ServerState>,
    Path(entry_id): Path<String>,
) -> AppResult<Json<ResolveResult>> {
    let location_id = state.manager.resolve_location(&entry_id).await?;
    Ok(Json(ResolveResult { location_id }))
}
