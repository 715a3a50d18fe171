//! User Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{User, UserCreate};

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY name")
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let rid = parse_record_id(USER_TABLE, id)?;
        let user: Option<User> = self.base.db().select(rid).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let user: Option<User> = result.take(0)?;
        Ok(user)
    }

    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Validation("User Already Exists!".to_string()));
        }

        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: None,
            name: data.name,
            email: data.email,
            hash_pass,
            role: data.role.unwrap_or_else(|| "user".to_string()),
            orders: Vec::new(),
        };

        let created: Option<User> = self.base.db().create(USER_TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Append an order back-reference to the user's order list
    ///
    /// Links are stored in their string form, matching how the documents
    /// serialize them.
    pub async fn append_order(
        &self,
        user_id: &surrealdb::RecordId,
        order_id: &surrealdb::RecordId,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $user SET orders += $order")
            .bind(("user", user_id.clone()))
            .bind(("order", order_id.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
