//! Repository Module
//!
//! CRUD and conditional-mutation operations over the SurrealDB tables.

pub mod inventory;
pub mod order;
pub mod pizza;
pub mod user;

pub use inventory::InventoryRepository;
pub use order::OrderRepository;
pub use pizza::PizzaRepository;
pub use user::UserRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse an API id string into a RecordId for the given table
///
/// Accepts both the bare key (`"abc"`) and the full `"table:abc"` form the
/// API serializes ids as.
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if let Some(key) = id.strip_prefix(&format!("{}:", table)) {
        let key = key.trim_start_matches('⟨').trim_end_matches('⟩');
        Ok(RecordId::from_table_key(table, key))
    } else if id.contains(':') {
        id.parse::<RecordId>()
            .map_err(|_| RepoError::Validation(format!("Invalid record id: {}", id)))
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
