//! Inventory Repository
//!
//! Stock counters live in four tables sharing one document shape. The
//! deduction path uses a single conditional UPDATE per ingredient so two
//! concurrent orders can never both pass the sufficiency check on the same
//! counter.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{IngredientKind, InventoryItem, InventoryItemCreate, InventoryItemUpdate};

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

/// Outcome of a conditional stock deduction
#[derive(Debug)]
pub enum DeductOutcome {
    /// Quantity decremented; the updated item is returned
    Deducted(InventoryItem),
    /// Item exists but holds less stock than required
    Insufficient(InventoryItem),
    /// No such item
    Missing,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All items of one kind, by name
    pub async fn find_all(&self, kind: IngredientKind) -> RepoResult<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = self
            .base
            .db()
            .query(format!("SELECT * FROM {} ORDER BY name", kind.table()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(
        &self,
        kind: IngredientKind,
        id: &str,
    ) -> RepoResult<Option<InventoryItem>> {
        let rid = parse_record_id(kind.table(), id)?;
        let item: Option<InventoryItem> = self.base.db().select(rid).await?;
        Ok(item)
    }

    pub async fn create(
        &self,
        kind: IngredientKind,
        data: InventoryItemCreate,
    ) -> RepoResult<InventoryItem> {
        if data.quantity < 0 {
            return Err(RepoError::Validation(
                "Quantity cannot be negative".to_string(),
            ));
        }
        let item = InventoryItem {
            id: None,
            name: data.name,
            quantity: data.quantity,
        };
        let created: Option<InventoryItem> =
            self.base.db().create(kind.table()).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory item".to_string()))
    }

    pub async fn update(
        &self,
        kind: IngredientKind,
        id: &str,
        data: InventoryItemUpdate,
    ) -> RepoResult<InventoryItem> {
        if let Some(q) = data.quantity
            && q < 0
        {
            return Err(RepoError::Validation(
                "Quantity cannot be negative".to_string(),
            ));
        }

        let rid = parse_record_id(kind.table(), id)?;

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.quantity.is_some() {
            set_parts.push("quantity = $quantity");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(kind, id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Item {} not found", id)));
        }

        let query_str = format!("UPDATE $item SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(query_str).bind(("item", rid));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.quantity {
            query = query.bind(("quantity", v));
        }

        let items: Vec<InventoryItem> = query.await?.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Item {} not found", id)))
    }

    pub async fn delete(&self, kind: IngredientKind, id: &str) -> RepoResult<()> {
        let rid = parse_record_id(kind.table(), id)?;
        let deleted: Option<InventoryItem> = self.base.db().delete(rid).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Item {} not found", id)));
        }
        Ok(())
    }

    /// Atomically decrement stock by `qty` only if `quantity >= qty`
    ///
    /// The sufficiency check and the decrement are one store operation, so
    /// a concurrent competitor observes either the full decrement or none
    /// of it. A no-op result means insufficient stock.
    pub async fn try_deduct(
        &self,
        id: &surrealdb::RecordId,
        qty: u32,
    ) -> RepoResult<DeductOutcome> {
        let qty = qty as i64;
        let updated: Vec<InventoryItem> = self
            .base
            .db()
            .query("UPDATE $item SET quantity -= $qty WHERE quantity >= $qty RETURN AFTER")
            .bind(("item", id.clone()))
            .bind(("qty", qty))
            .await?
            .take(0)?;

        if let Some(item) = updated.into_iter().next() {
            return Ok(DeductOutcome::Deducted(item));
        }

        // The update matched nothing: either the item is absent or the
        // stock is short. Distinguish for the error taxonomy.
        let existing: Option<InventoryItem> = self.base.db().select(id.clone()).await?;
        match existing {
            Some(item) => Ok(DeductOutcome::Insufficient(item)),
            None => Ok(DeductOutcome::Missing),
        }
    }

    /// Compensating action: give back stock taken by an earlier deduction
    /// within a placement that later failed
    pub async fn restore(&self, id: &surrealdb::RecordId, qty: u32) -> RepoResult<()> {
        let qty = qty as i64;
        self.base
            .db()
            .query("UPDATE $item SET quantity += $qty")
            .bind(("item", id.clone()))
            .bind(("qty", qty))
            .await?
            .check()?;
        Ok(())
    }
}
