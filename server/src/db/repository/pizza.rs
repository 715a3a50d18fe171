//! Pizza Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Pizza, PizzaCreate, PizzaUpdate};

const PIZZA_TABLE: &str = "pizza";

#[derive(Clone)]
pub struct PizzaRepository {
    base: BaseRepository,
}

impl PizzaRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Pizza>> {
        let pizzas: Vec<Pizza> = self
            .base
            .db()
            .query("SELECT * FROM pizza ORDER BY name")
            .await?
            .take(0)?;
        Ok(pizzas)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Pizza>> {
        let rid = parse_record_id(PIZZA_TABLE, id)?;
        let pizza: Option<Pizza> = self.base.db().select(rid).await?;
        Ok(pizza)
    }

    pub async fn create(&self, data: PizzaCreate, created_by: &str) -> RepoResult<Pizza> {
        if data.price <= 0.0 {
            return Err(RepoError::Validation("Price must be positive".to_string()));
        }

        let pizza = Pizza {
            id: None,
            name: data.name,
            description: data.description.unwrap_or_default(),
            base: data.base,
            sauces: data.sauces,
            cheeses: data.cheeses,
            veggies: data.veggies,
            price: data.price,
            size: data.size.unwrap_or_else(|| "medium".to_string()),
            image_url: data.image_url.unwrap_or_default(),
            created_by: created_by.to_string(),
        };

        let created: Option<Pizza> = self.base.db().create(PIZZA_TABLE).content(pizza).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create pizza".to_string()))
    }

    pub async fn update(&self, id: &str, data: PizzaUpdate) -> RepoResult<Pizza> {
        if let Some(p) = data.price
            && p <= 0.0
        {
            return Err(RepoError::Validation("Price must be positive".to_string()));
        }

        let rid = parse_record_id(PIZZA_TABLE, id)?;

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.base.is_some() {
            set_parts.push("base = $base");
        }
        if data.sauces.is_some() {
            set_parts.push("sauces = $sauces");
        }
        if data.cheeses.is_some() {
            set_parts.push("cheeses = $cheeses");
        }
        if data.veggies.is_some() {
            set_parts.push("veggies = $veggies");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.size.is_some() {
            set_parts.push("size = $size");
        }
        if data.image_url.is_some() {
            // camelCase on the wire and in the store
            set_parts.push("imageUrl = $image_url");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Pizza {} not found", id)));
        }

        let query_str = format!("UPDATE $pizza SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(query_str).bind(("pizza", rid));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        // links are stored in their string form, matching the documents
        if let Some(v) = data.base {
            query = query.bind(("base", v.to_string()));
        }
        if let Some(v) = data.sauces {
            let v: Vec<String> = v.iter().map(|r| r.to_string()).collect();
            query = query.bind(("sauces", v));
        }
        if let Some(v) = data.cheeses {
            let v: Vec<String> = v.iter().map(|r| r.to_string()).collect();
            query = query.bind(("cheeses", v));
        }
        if let Some(v) = data.veggies {
            let v: Vec<String> = v.iter().map(|r| r.to_string()).collect();
            query = query.bind(("veggies", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.size {
            query = query.bind(("size", v));
        }
        if let Some(v) = data.image_url {
            query = query.bind(("image_url", v));
        }

        let pizzas: Vec<Pizza> = query.await?.take(0)?;
        pizzas
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Pizza {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let rid = parse_record_id(PIZZA_TABLE, id)?;
        let deleted: Option<Pizza> = self.base.db().delete(rid).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Pizza {} not found", id)));
        }
        Ok(())
    }
}
