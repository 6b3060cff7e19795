//! Wishlist Domain Module
//!
//! A deduplicated, insertion-ordered set of products plus its persisted
//! wrapper and REST handlers.

pub mod handlers;
pub mod ledger;
pub mod set;

pub use handlers::routes;
pub use ledger::WishlistLedger;
pub use set::WishlistSet;
