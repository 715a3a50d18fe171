//! Order API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{CreateOrderRequest, Order, OrderStatusUpdate};
use crate::db::repository::{OrderRepository, parse_record_id};
use crate::orders::{place_order, update_status};
use crate::payment::{CheckoutRequest, CheckoutResponse};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub created_order: Order,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderResponse {
    pub updated_order: Order,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// POST /api/orders - place an order for the authenticated user
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    let created_order = place_order(&state.db, &current_user.id, payload).await?;

    Ok(Json(CreateOrderResponse {
        created_order,
        message: "Order Created Successfully!".to_string(),
    }))
}

/// POST /api/orders/checkout - create a Stripe payment intent
///
/// The returned client secret is confirmed by the storefront; its payment
/// id then satisfies the order-creation precondition.
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    if !(payload.amount > 0.0) {
        return Err(AppError::validation("Invalid amount"));
    }

    let currency = payload
        .currency
        .as_deref()
        .unwrap_or(&state.config.stripe_currency);

    let response = state
        .payment
        .create_payment_intent(payload.amount, currency)
        .await?;

    Ok(Json(response))
}

/// GET /api/orders/user - the caller's order history
pub async fn list_own(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Order>>> {
    let user_rid = parse_record_id("user", &current_user.id)?;
    let orders = OrderRepository::new(state.get_db())
        .find_by_user(&user_rid)
        .await?;

    if orders.is_empty() {
        return Err(AppError::not_found("Orders Not Found!"));
    }
    Ok(Json(orders))
}

/// GET /api/orders - admin
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.get_db()).find_all().await?;

    if orders.is_empty() {
        return Err(AppError::not_found("Orders Not Found!"));
    }
    Ok(Json(orders))
}

/// GET /api/orders/:id - admin
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = OrderRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order Not Found!"))?;
    Ok(Json(order))
}

/// PUT /api/orders/:id - admin status update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<UpdateOrderResponse>> {
    let updated_order = update_status(&state.db, &id, payload).await?;

    Ok(Json(UpdateOrderResponse {
        updated_order,
        message: "Order Updated Successfully!".to_string(),
    }))
}

/// DELETE /api/orders/:id - admin; deducted inventory is not restored
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    OrderRepository::new(state.get_db()).delete(&id).await?;
    Ok(Json(DeleteResponse {
        message: "Order Deleted Successfully!".to_string(),
    }))
}
