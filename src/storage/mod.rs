//! Persistence
//!
//! A string key-value store plus the [`PersistenceAdapter`] that the cart,
//! wishlist and theme use to load and save their whole state.
//! Persistence is best-effort: in-memory state is the source of truth.

pub mod adapter;
pub mod store;

pub use adapter::{PersistenceAdapter, CART_KEY, THEME_KEY, WISHLIST_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
