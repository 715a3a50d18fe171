//! Inventory Models
//!
//! One ingredient document shape shared by four collections (base, sauce,
//! cheese, veggie). Quantities are decremented during order placement and
//! must never go negative; a deduction that would cross zero fails the
//! whole containing operation instead of clamping.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use crate::utils::AppError;

/// The four ingredient collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    Base,
    Sauce,
    Cheese,
    Veggie,
}

impl IngredientKind {
    /// All kinds in deduction order
    pub const ALL: [IngredientKind; 4] = [
        IngredientKind::Base,
        IngredientKind::Sauce,
        IngredientKind::Cheese,
        IngredientKind::Veggie,
    ];

    /// Table name backing this kind
    pub fn table(&self) -> &'static str {
        match self {
            IngredientKind::Base => "base",
            IngredientKind::Sauce => "sauce",
            IngredientKind::Cheese => "cheese",
            IngredientKind::Veggie => "veggie",
        }
    }

    /// Parse a URL path segment like `"sauce"` into a kind
    pub fn from_path(segment: &str) -> Result<Self, AppError> {
        match segment {
            "base" => Ok(IngredientKind::Base),
            "sauce" => Ok(IngredientKind::Sauce),
            "cheese" => Ok(IngredientKind::Cheese),
            "veggie" => Ok(IngredientKind::Veggie),
            other => Err(AppError::validation(format!(
                "Unknown inventory kind: {}",
                other
            ))),
        }
    }
}

/// Ingredient document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub quantity: i64,
}

/// Create ingredient payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub quantity: i64,
}

/// Update ingredient payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}
