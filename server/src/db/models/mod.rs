//! Database Models
//!
//! Document shapes for the four stores: inventory (base/sauce/cheese/
//! veggie), catalog (pizza), orders, and users.

pub mod serde_helpers;

pub mod inventory;
pub mod order;
pub mod pizza;
pub mod user;

pub use inventory::{IngredientKind, InventoryItem, InventoryItemCreate, InventoryItemUpdate};
pub use order::{
    CreateOrderRequest, DeliveryAddress, Order, OrderItemInput, OrderLineItem, OrderStatus,
    OrderStatusUpdate, PaymentInfo,
};
pub use pizza::{Pizza, PizzaCreate, PizzaUpdate};
pub use user::{User, UserCreate, UserPublic};
