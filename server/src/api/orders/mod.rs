//! Order API module
//!
//! Customer routes (place, own history, checkout) plus the admin order
//! dashboard (list, inspect, status updates, delete).

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let customer_routes = Router::new()
        .route("/", post(handler::create))
        .route("/user", get(handler::list_own))
        .route("/checkout", post(handler::checkout));

    let admin_routes = Router::new()
        .route("/", get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin));

    customer_routes.merge(admin_routes)
}
