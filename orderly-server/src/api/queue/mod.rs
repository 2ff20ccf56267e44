//! Queue API module
//!
//! Visitor-facing routes: join, leave, position lookup and entry-id
//! resolution. All public — visitors hold no credentials, only their
//! entry id.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/queue", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/join", post(handler::join))
        .route("/resolve/{entry_id}", get(handler::resolve))
        .route("/{location_id}/{entry_id}", get(handler::position))
        .route("/{location_id}/{entry_id}/leave", post(handler::leave))
}
