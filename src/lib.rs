//! Storefront Library
//!
//! Catalog browsing, a priced shopping cart and a wishlist on top of a
//! remote product API, served over a small REST interface.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod theme;
pub mod wishlist;

// Infrastructure
pub mod config;
pub mod error;
pub mod logger;
pub mod router;
pub mod state;
pub mod storage;
