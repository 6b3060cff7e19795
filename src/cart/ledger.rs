//! Cart Ledger
//!
//! Owns the cart, the pricing constants and the promo table. Every mutation
//! runs to completion, is saved through the persistence adapter, and can be
//! followed by a fresh [`summary`](CartLedger::summary).

use rust_decimal::Decimal;

use super::{
    models::{format_item_summary, Cart},
    pricing::{summarize, PricingConfig, PricingSummary, PromoTable},
};
use crate::{
    catalog::models::{Product, ProductId},
    error::PromoCodeError,
    storage::PersistenceAdapter,
};

pub struct CartLedger {
    cart: Cart,
    pricing: PricingConfig,
    promos: PromoTable,
    persistence: PersistenceAdapter,
}

impl CartLedger {
    /// Restores the persisted cart, starting empty when it is absent or
    /// fails the cart invariants.
    pub fn load(
        persistence: PersistenceAdapter,
        pricing: PricingConfig,
        promos: PromoTable,
    ) -> Self {
        let cart = match persistence.load_cart() {
            Some(cart) if cart.is_consistent(&promos) => cart,
            Some(_) => {
                tracing::warn!("Persisted cart violates cart invariants, starting empty");
                Cart::default()
            }
            None => Cart::default(),
        };

        tracing::info!(lines = cart.items.len(), "Cart loaded");

        Self {
            cart,
            pricing,
            promos,
            persistence,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn summary(&self) -> PricingSummary {
        summarize(&self.cart, &self.pricing)
    }

    pub fn add(&mut self, product: Product) {
        tracing::debug!(product_id = product.id, "Adding to cart");
        self.cart.add(product);
        self.save();
    }

    pub fn remove(&mut self, product_id: ProductId) {
        self.cart.remove(product_id);
        self.save();
    }

    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        self.cart.set_quantity(product_id, quantity);
        self.save();
    }

    pub fn increment(&mut self, product_id: ProductId) {
        self.cart.increment(product_id);
        self.save();
    }

    pub fn decrement(&mut self, product_id: ProductId) {
        self.cart.decrement(product_id);
        self.save();
    }

    /// Returns the granted discount percentage, or the rejection.
    pub fn apply_promo_code(&mut self, code: &str) -> Result<Decimal, PromoCodeError> {
        let outcome = self.cart.apply_promo_code(code, &self.promos);
        match &outcome {
            Ok(percent) => tracing::info!(%percent, "Promo code applied"),
            Err(e) => tracing::info!(error = %e, "Promo code rejected"),
        }
        self.save();
        outcome
    }

    pub fn remove_promo_code(&mut self) {
        self.cart.remove_promo_code();
        self.save();
    }

    pub fn clear(&mut self) {
        if !self.cart.is_empty() {
            tracing::info!(items = %format_item_summary(&self.cart.items), "Clearing cart");
        }
        self.cart.clear();
        self.save();
    }

    fn save(&self) {
        self.persistence.save_cart(&self.cart);
    }
}
