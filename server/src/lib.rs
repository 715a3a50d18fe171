//! Pizzeria Server - online pizza storefront backend
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): RESTful routes for the storefront and the admin
//!   dashboard
//! - **Database** (`db`): embedded SurrealDB storage (models + repositories)
//! - **Auth** (`auth`): JWT + Argon2 authentication
//! - **Orders** (`orders`): the order-creation transaction and lifecycle
//! - **Payment** (`payment`): Stripe payment-intent adapter
//!
//! # Module layout
//!
//! ```text
//! server/src/
//! ├── core/          # config, state, HTTP server
//! ├── auth/          # JWT service, middleware
//! ├── api/           # routes and handlers
//! ├── db/            # models, repositories, DbService
//! ├── orders/        # placement transaction, lifecycle
//! ├── payment/       # Stripe adapter
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod payment;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};
