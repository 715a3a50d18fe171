//! Order Models
//!
//! An order is created exactly once by the placement transaction; only
//! `status` and `deliveredAt` may change afterwards, and only through the
//! lifecycle handler. Line items are embedded snapshots (pizza reference,
//! quantity, price at order time), never independently persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Order lifecycle states
///
/// `Received → In the Kitchen → Sent for Delivery → Delivered` is the
/// conventional progression, but any authorized caller may set any state;
/// backward moves are allowed for administrative correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Received,
    #[serde(rename = "In the Kitchen")]
    InTheKitchen,
    #[serde(rename = "Sent for Delivery")]
    SentForDelivery,
    Delivered,
}

/// Delivery address embedded in an order; all five fields are required
/// and non-empty at validation time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

impl DeliveryAddress {
    /// All five fields present and non-empty
    pub fn is_complete(&self) -> bool {
        !self.phone_number.trim().is_empty()
            && !self.address.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.postal_code.trim().is_empty()
            && !self.country.trim().is_empty()
    }
}

/// Payment details captured at checkout; the reference id comes from the
/// payment provider and is a precondition for order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub method: String,
    #[serde(default)]
    pub stripe_payment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// One (pizza, quantity, price-snapshot) entry within an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    #[serde(with = "serde_helpers::record_id")]
    pub pizza: RecordId,
    pub qty: u32,
    pub price: f64,
}

/// Order document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub order_items: Vec<OrderLineItem>,
    pub delivery_address: DeliveryAddress,
    pub sales_tax: f64,
    pub delivery_charges: f64,
    pub total_price: f64,
    pub payment: PaymentInfo,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ========== Request DTOs ==========

/// One cart entry in an incoming order request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub pizza_id: String,
    pub qty: u32,
    pub price: f64,
}

/// `POST /api/orders` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub order_items: Vec<OrderItemInput>,
    pub delivery_address: DeliveryAddress,
    pub sales_tax: f64,
    pub delivery_charges: f64,
    pub total_price: f64,
    pub payment: PaymentInfo,
}

/// `PUT /api/orders/:id` request body; a missing status keeps the current
/// one (the deliveredAt rule still applies to whatever status results)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}
