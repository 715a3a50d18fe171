//! Auth API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::UserPublic;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPublic,
}

/// POST /api/auth/login
///
/// Credential failures are indistinguishable from unknown accounts; both
/// return the unified invalid-credentials message.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let users = UserRepository::new(state.get_db());

    let user = users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let verified = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !verified {
        tracing::warn!(email = %payload.email, "Login failed");
        return Err(AppError::invalid_credentials());
    }

    let user_id = user
        .id
        .as_ref()
        .map(|i| i.to_string())
        .ok_or_else(|| AppError::internal("User record without id"))?;

    let token = state
        .jwt_service()
        .generate_token(&user_id, &user.name, &user.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(user = %user_id, "Login successful");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}
