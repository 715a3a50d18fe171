//! Utility module - shared helpers and types

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, ErrorBody};
