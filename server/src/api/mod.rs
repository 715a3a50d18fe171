//! API route modules
//!
//! One module per resource, each exposing a `router()`:
//!
//! - [`health`] - liveness probe (public)
//! - [`auth`] - login
//! - [`pizzas`] - storefront catalog (public reads, admin writes)
//! - [`inventory`] - ingredient stock management (admin)
//! - [`users`] - dashboard user management (admin)
//! - [`orders`] - order placement, history, checkout and admin lifecycle

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;

pub mod auth;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod pizzas;
pub mod users;

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware and no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(pizzas::router())
        .merge(inventory::router())
        .merge(users::router())
        .merge(orders::router())
}

/// Fully configured application: routes plus the middleware stack
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // ========== Application Middleware ==========
        // JWT authentication - runs before routes, injects CurrentUser
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
}
