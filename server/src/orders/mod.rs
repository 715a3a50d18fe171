//! Order domain logic
//!
//! - [`place`] - the order-creation transaction (validate, deduct
//!   inventory, persist, link to user)
//! - [`lifecycle`] - administrative status updates and the delivery
//!   timestamp rule

pub mod lifecycle;
pub mod place;

pub use lifecycle::update_status;
pub use place::place_order;

#[cfg(test)]
mod tests;
