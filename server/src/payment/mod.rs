//! Payment Adapter
//!
//! Thin client over the Stripe payment-intents API. Order creation treats
//! the resulting reference id as an opaque precondition; nothing here
//! touches the order or inventory stores.

mod stripe;

pub use stripe::{CheckoutRequest, CheckoutResponse, StripeClient};
