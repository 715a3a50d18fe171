//! Pizza catalog API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Pizza, PizzaCreate, PizzaUpdate};
use crate::db::repository::PizzaRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// GET /api/pizzas - full storefront catalog
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Pizza>>> {
    let pizzas = PizzaRepository::new(state.get_db()).find_all().await?;
    Ok(Json(pizzas))
}

/// GET /api/pizzas/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Pizza>> {
    let pizza = PizzaRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Pizza Not Found!"))?;
    Ok(Json(pizza))
}

/// POST /api/pizzas - admin
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<PizzaCreate>,
) -> AppResult<Json<Pizza>> {
    let pizza = PizzaRepository::new(state.get_db())
        .create(payload, &current_user.name)
        .await?;

    tracing::info!(pizza = %pizza.name, by = %current_user.name, "Pizza created");
    Ok(Json(pizza))
}

/// PUT /api/pizzas/:id - admin
///
/// Orders snapshot price and quantity at placement, so edits here never
/// alter order history.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PizzaUpdate>,
) -> AppResult<Json<Pizza>> {
    let pizza = PizzaRepository::new(state.get_db()).update(&id, payload).await?;
    Ok(Json(pizza))
}

/// DELETE /api/pizzas/:id - admin
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    PizzaRepository::new(state.get_db()).delete(&id).await?;
    Ok(Json(DeleteResponse {
        message: "Pizza Deleted Successfully!".to_string(),
    }))
}
