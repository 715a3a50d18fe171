//! User API Handlers
//!
//! Responses use [`UserPublic`]; the stored argon2 hash never leaves the
//! db layer.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{UserCreate, UserPublic};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/users - admin
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserPublic>>> {
    let users = UserRepository::new(state.get_db()).find_all().await?;
    Ok(Json(users.into_iter().map(UserPublic::from).collect()))
}

/// GET /api/users/:id - admin
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserPublic>> {
    let user = UserRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("User Not Found!"))?;
    Ok(Json(user.into()))
}

/// POST /api/users - admin
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserPublic>> {
    let user = UserRepository::new(state.get_db()).create(payload).await?;

    tracing::info!(email = %user.email, role = %user.role, "User created");
    Ok(Json(user.into()))
}
