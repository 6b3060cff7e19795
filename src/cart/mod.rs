//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (Cart, CartLineItem) and their state transitions
//! - Pricing derivation and the promo code table
//! - The persisted cart ledger
//! - REST API handlers

pub mod handlers;
pub mod ledger;
pub mod models;
pub mod pricing;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use ledger::CartLedger;
pub use models::{Cart, CartLineItem};
pub use pricing::{summarize, PricingConfig, PricingSummary, PromoTable};
