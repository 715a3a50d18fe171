//! Order placement transaction
//!
//! Orchestrates a single order-creation request: validation, inventory
//! deduction, order persistence, and user linkage. Deductions use atomic
//! conditional decrements, and any failure after a partial deduction
//! compensates every decrement already applied, so a failed request
//! leaves stock exactly as it found it.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{CreateOrderRequest, Order, OrderLineItem, OrderStatus};
use crate::db::repository::inventory::DeductOutcome;
use crate::db::repository::{
    InventoryRepository, OrderRepository, PizzaRepository, UserRepository, parse_record_id,
};
use crate::utils::{AppError, AppResult};

/// Fail-fast request validation; the first violated rule wins and each
/// rule maps to a distinct message
fn validate(req: &CreateOrderRequest) -> AppResult<()> {
    if req.order_items.is_empty() {
        return Err(AppError::validation("No Order Items"));
    }
    if req.order_items.iter().any(|item| item.qty == 0) {
        return Err(AppError::validation("Invalid Order Item Quantity"));
    }
    if !req.delivery_address.is_complete() {
        return Err(AppError::validation("Invalid Delivery Address"));
    }
    if !(req.total_price > 0.0) {
        return Err(AppError::validation("Invalid Total Price"));
    }
    if !(req.delivery_charges >= 0.0) {
        return Err(AppError::validation("Invalid Delivery Charges"));
    }
    if !(req.sales_tax >= 0.0) {
        return Err(AppError::validation("Invalid Sales Tax"));
    }
    if req.payment.method != "stripe" {
        return Err(AppError::validation("Invalid Payment Method"));
    }
    if req.payment.stripe_payment_id.trim().is_empty() {
        return Err(AppError::validation("Invalid Stripe Payment Intent ID"));
    }
    Ok(())
}

/// Give back every decrement applied so far, in reverse order
///
/// Restore failures are logged and skipped; there is nothing better to do
/// with them mid-abort.
async fn compensate(inventory: &InventoryRepository, applied: &[(RecordId, u32)]) {
    for (id, qty) in applied.iter().rev() {
        if let Err(e) = inventory.restore(id, *qty).await {
            tracing::error!(item = %id, qty, error = %e, "Failed to restore inventory during abort");
        }
    }
}

/// Place an order for the authenticated principal
///
/// On success the persisted order (status `Received`) is returned and its
/// id has been appended to the user's order list.
pub async fn place_order(
    db: &Surreal<Db>,
    user_id: &str,
    req: CreateOrderRequest,
) -> AppResult<Order> {
    validate(&req)?;

    let user_rid = parse_record_id("user", user_id)?;

    let pizzas = PizzaRepository::new(db.clone());
    let inventory = InventoryRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());
    let users = UserRepository::new(db.clone());

    // Deduct stock per line item, in sequence order. Every successful
    // decrement is recorded so a later failure can compensate it.
    let mut applied: Vec<(RecordId, u32)> = Vec::new();
    let mut line_items: Vec<OrderLineItem> = Vec::with_capacity(req.order_items.len());

    for item in &req.order_items {
        let pizza = match pizzas.find_by_id(&item.pizza_id).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                compensate(&inventory, &applied).await;
                return Err(AppError::not_found("Pizza Not Found!"));
            }
            Err(e) => {
                compensate(&inventory, &applied).await;
                return Err(e.into());
            }
        };

        for (_kind, ingredient) in pizza.ingredients() {
            match inventory.try_deduct(&ingredient, item.qty).await {
                Ok(DeductOutcome::Deducted(_)) => {
                    applied.push((ingredient, item.qty));
                }
                Ok(DeductOutcome::Insufficient(short)) => {
                    compensate(&inventory, &applied).await;
                    return Err(AppError::InsufficientInventory(format!(
                        "Not enough {} in inventory! Please update inventory!",
                        short.name
                    )));
                }
                Ok(DeductOutcome::Missing) => {
                    compensate(&inventory, &applied).await;
                    return Err(AppError::not_found("Item Not Found!"));
                }
                Err(e) => {
                    compensate(&inventory, &applied).await;
                    return Err(e.into());
                }
            }
        }

        let pizza_rid = pizza
            .id
            .ok_or_else(|| AppError::internal("Pizza record without id"))?;
        line_items.push(OrderLineItem {
            pizza: pizza_rid,
            qty: item.qty,
            price: item.price,
        });
    }

    // Persist the order; a write failure here also gives the stock back
    let order = Order {
        id: None,
        user: user_rid.clone(),
        order_items: line_items,
        delivery_address: req.delivery_address,
        sales_tax: req.sales_tax,
        delivery_charges: req.delivery_charges,
        total_price: req.total_price,
        payment: req.payment,
        status: OrderStatus::Received,
        delivered_at: None,
        created_at: chrono::Utc::now(),
    };

    let created = match orders.create(order).await {
        Ok(o) => o,
        Err(e) => {
            compensate(&inventory, &applied).await;
            return Err(e.into());
        }
    };

    // Back-reference on the user. The order is the source of truth for its
    // own fields, so a linkage failure is logged rather than undoing the
    // order.
    if let Some(order_rid) = created.id.as_ref() {
        if let Err(e) = users.append_order(&user_rid, order_rid).await {
            tracing::warn!(user = %user_rid, order = %order_rid, error = %e,
                "Failed to link order to user");
        }
    }

    tracing::info!(
        user = %user_rid,
        order = %created.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
        total = created.total_price,
        "Order created"
    );

    Ok(created)
}
