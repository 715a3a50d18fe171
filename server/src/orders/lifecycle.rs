//! Order lifecycle
//!
//! Administrative status updates. The status set is closed but transitions
//! are not ordered: any recognized status may be written at any time, and
//! `deliveredAt` is derived from the resulting status on every update.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Order, OrderStatus, OrderStatusUpdate};
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};

/// Apply a status update to an order
///
/// A missing status in the request keeps the current one; the delivery
/// timestamp rule still applies to whatever status results: `Delivered`
/// stamps now, anything else clears it.
pub async fn update_status(
    db: &Surreal<Db>,
    order_id: &str,
    update: OrderStatusUpdate,
) -> AppResult<Order> {
    let orders = OrderRepository::new(db.clone());

    let existing = orders
        .find_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::not_found("Order Not Found!"))?;

    let status = update.status.unwrap_or(existing.status);
    let delivered_at = if status == OrderStatus::Delivered {
        Some(chrono::Utc::now())
    } else {
        None
    };

    let updated = orders.set_status(order_id, status, delivered_at).await?;

    tracing::info!(order = order_id, status = ?status, "Order status updated");

    Ok(updated)
}
