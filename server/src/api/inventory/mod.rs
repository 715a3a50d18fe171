//! Inventory API module
//!
//! Stock management for the four ingredient collections. The whole surface
//! is part of the admin dashboard.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all))
        .route("/{kind}", get(handler::list).post(handler::create))
        .route(
            "/{kind}/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin))
}
