//! Catalog Domain Module
//!
//! - Product models as served by the product API
//! - The query engine (filter, sort, paginate)
//! - Derived selectors (featured products, price range)
//! - Catalog providers
//! - REST API handlers

pub mod handlers;
pub mod models;
pub mod provider;
pub mod query;
pub mod selectors;

pub use handlers::routes;
pub use models::{CatalogStatus, Product, ProductId, Rating};
pub use provider::{CatalogProvider, HttpCatalogProvider, StaticCatalog};
pub use query::{apply, CatalogView, Query, SortBy, SortOrder};
