//! Auth API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    // login is on the public allowlist; everything it returns is needed to
    // call the rest of the API
    Router::new().route("/login", post(handler::login))
}
