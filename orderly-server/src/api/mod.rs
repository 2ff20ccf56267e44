//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - admin login
//! - [`locations`] - location CRUD, stats and serve-next (admin parts gated)
//! - [`queue`] - join/leave/position/resolve for visitors
//! - [`upload`] - receipt attachment upload
//! - [`qr`] - locally stored QR image serving

pub mod auth;
pub mod health;
pub mod locations;
pub mod qr;
pub mod queue;
pub mod upload;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Create the combined router
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(locations::router(state.clone()))
        .merge(queue::router())
        .merge(upload::router())
        .merge(qr::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
