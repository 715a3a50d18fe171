//! Order Repository
//!
//! Orders are written once by the placement transaction; `status` and
//! `deliveredAt` are the only fields mutated afterwards.

use chrono::{DateTime, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Order, OrderStatus};

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Order Creation Failed!".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = parse_record_id(ORDER_TABLE, id)?;
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order)
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY createdAt")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders belonging to one user (customer-facing order history)
    ///
    /// `user` is stored in its string form, so the comparison binds the
    /// string representation.
    pub async fn find_by_user(&self, user_id: &surrealdb::RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user = $user ORDER BY createdAt")
            .bind(("user", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Overwrite status and the derived delivery timestamp
    pub async fn set_status(
        &self,
        id: &str,
        status: OrderStatus,
        delivered_at: Option<DateTime<Utc>>,
    ) -> RepoResult<Order> {
        let rid = parse_record_id(ORDER_TABLE, id)?;
        let orders: Vec<Order> = self
            .base
            .db()
            .query("UPDATE $order SET status = $status, deliveredAt = $delivered RETURN AFTER")
            .bind(("order", rid))
            .bind(("status", status))
            .bind(("delivered", delivered_at))
            .await?
            .take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Order Not Found!".to_string()))
    }

    /// Administrative removal; deducted inventory is not restored
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let rid = parse_record_id(ORDER_TABLE, id)?;
        let deleted: Option<Order> = self.base.db().delete(rid).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("Order Not Found!".to_string()));
        }
        Ok(())
    }
}
