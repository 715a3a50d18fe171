//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{IngredientKind, InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use crate::db::repository::InventoryRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// All four collections grouped, for the dashboard stock overview
#[derive(Debug, Serialize)]
pub struct InventoryOverview {
    pub bases: Vec<InventoryItem>,
    pub sauces: Vec<InventoryItem>,
    pub cheeses: Vec<InventoryItem>,
    pub veggies: Vec<InventoryItem>,
}

/// GET /api/inventory - all kinds grouped
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<InventoryOverview>> {
    let repo = InventoryRepository::new(state.get_db());

    Ok(Json(InventoryOverview {
        bases: repo.find_all(IngredientKind::Base).await?,
        sauces: repo.find_all(IngredientKind::Sauce).await?,
        cheeses: repo.find_all(IngredientKind::Cheese).await?,
        veggies: repo.find_all(IngredientKind::Veggie).await?,
    }))
}

/// GET /api/inventory/:kind
pub async fn list(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let kind = IngredientKind::from_path(&kind)?;
    let items = InventoryRepository::new(state.get_db()).find_all(kind).await?;
    Ok(Json(items))
}

/// GET /api/inventory/:kind/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<InventoryItem>> {
    let kind = IngredientKind::from_path(&kind)?;
    let item = InventoryRepository::new(state.get_db())
        .find_by_id(kind, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Item Not Found!"))?;
    Ok(Json(item))
}

/// POST /api/inventory/:kind
pub async fn create(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<Json<InventoryItem>> {
    let kind = IngredientKind::from_path(&kind)?;
    let item = InventoryRepository::new(state.get_db())
        .create(kind, payload)
        .await?;

    tracing::info!(kind = kind.table(), item = %item.name, "Inventory item created");
    Ok(Json(item))
}

/// PUT /api/inventory/:kind/:id - negative quantities are rejected
pub async fn update(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(String, String)>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItem>> {
    let kind = IngredientKind::from_path(&kind)?;
    let item = InventoryRepository::new(state.get_db())
        .update(kind, &id, payload)
        .await?;
    Ok(Json(item))
}

/// DELETE /api/inventory/:kind/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<DeleteResponse>> {
    let kind = IngredientKind::from_path(&kind)?;
    InventoryRepository::new(state.get_db()).delete(kind, &id).await?;
    Ok(Json(DeleteResponse {
        message: "Item Deleted Successfully!".to_string(),
    }))
}
