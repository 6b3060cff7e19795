//! Catalog Domain Models
//!
//! Products arrive from the remote product API and are never constructed by
//! the storefront itself; they are compared only by `id`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the product API
pub type ProductId = u64;

/// Aggregate customer rating
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    /// Average score in `[0, 5]`
    pub rate: Decimal,

    /// Number of ratings behind the average
    pub count: u32,
}

/// A catalog product, shaped like the product API's JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

/// Load state of the catalog snapshot held by the application.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum CatalogStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Cheapest and dearest price in the catalog, widened to whole units
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}
