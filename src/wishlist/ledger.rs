//! Persisted wishlist
//!
//! Wraps a [`WishlistSet`] and saves it after every mutation.

use super::set::WishlistSet;
use crate::{
    catalog::models::{Product, ProductId},
    storage::PersistenceAdapter,
};

pub struct WishlistLedger {
    set: WishlistSet,
    persistence: PersistenceAdapter,
}

impl WishlistLedger {
    pub fn load(persistence: PersistenceAdapter) -> Self {
        // Re-collect so a hand-edited file with duplicate ids still yields a set.
        let set = persistence
            .load_wishlist()
            .map(|stored| WishlistSet::from_products(stored.items().iter().cloned()))
            .unwrap_or_default();

        tracing::info!(items = set.len(), "Wishlist loaded");
        Self { set, persistence }
    }

    pub fn set(&self) -> &WishlistSet {
        &self.set
    }

    /// Adding a product that is already present changes nothing and skips the save.
    pub fn add(&mut self, product: Product) {
        if self.set.add(product) {
            self.save();
        }
    }

    pub fn remove(&mut self, product_id: ProductId) {
        self.set.remove(product_id);
        self.save();
    }

    pub fn toggle(&mut self, product: Product) -> bool {
        let present = self.set.toggle(product);
        self.save();
        present
    }

    pub fn clear(&mut self) {
        self.set.clear();
        self.save();
    }

    fn save(&self) {
        self.persistence.save_wishlist(&self.set);
    }
}
