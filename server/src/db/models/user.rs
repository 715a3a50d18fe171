//! User Model
//!
//! Users carry back-references to their orders. The linkage is a
//! convenience for order history; the order document remains the source of
//! truth for its own fields even if this linkage is lost.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// User document as stored; the argon2 hash never leaves the db layer;
/// API responses use [`UserPublic`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub hash_pass: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub orders: Vec<RecordId>,
}

fn default_role() -> String {
    "user".to_string()
}

/// User shape returned by the API (no credential material)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub orders: Vec<RecordId>,
}

impl From<User> for UserPublic {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            orders: u.orders,
        }
    }
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

impl User {
    /// Admin dashboard access is granted to admins and managers
    pub fn is_admin(&self) -> bool {
        self.role == "admin" || self.role == "manager"
    }

    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}
