//! Locations API module
//!
//! Public read routes plus the admin console routes (create, delete,
//! waiting list, serve-next) behind the admin gate.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/locations", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/stats", get(handler::stats))
        .route("/{id}/qr", get(handler::qr_links));

    let admin_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::remove))
        .route("/{id}/queue", get(handler::waiting_list))
        .route("/{id}/serve", post(handler::serve))
        .layer(middleware::from_fn_with_state(state, require_admin));

    public_routes.merge(admin_routes)
}
