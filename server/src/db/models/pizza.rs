//! Pizza Model
//!
//! Catalog documents. A pizza's composition is one mandatory base plus
//! variable-length sauce/cheese/veggie reference sets into the inventory
//! collections. Orders snapshot price and quantity, so editing a pizza
//! never retroactively alters historical orders.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Pizza catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Record link to one base
    #[serde(with = "serde_helpers::record_id")]
    pub base: RecordId,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub sauces: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub cheeses: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub veggies: Vec<RecordId>,
    pub price: f64,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub created_by: String,
}

impl Pizza {
    /// The composition as (kind, ingredient) pairs in deduction order,
    /// treating the mandatory base as a one-element set
    pub fn ingredients(&self) -> Vec<(crate::db::models::IngredientKind, RecordId)> {
        use crate::db::models::IngredientKind;

        let mut refs = vec![(IngredientKind::Base, self.base.clone())];
        refs.extend(
            self.sauces
                .iter()
                .map(|r| (IngredientKind::Sauce, r.clone())),
        );
        refs.extend(
            self.cheeses
                .iter()
                .map(|r| (IngredientKind::Cheese, r.clone())),
        );
        refs.extend(
            self.veggies
                .iter()
                .map(|r| (IngredientKind::Veggie, r.clone())),
        );
        refs
    }
}

/// Create pizza payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub base: RecordId,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub sauces: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub cheeses: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub veggies: Vec<RecordId>,
    pub price: f64,
    pub size: Option<String>,
    pub image_url: Option<String>,
}

/// Update pizza payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub base: Option<RecordId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_vec_record_id"
    )]
    pub sauces: Option<Vec<RecordId>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_vec_record_id"
    )]
    pub cheeses: Option<Vec<RecordId>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_vec_record_id"
    )]
    pub veggies: Option<Vec<RecordId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
