//! Shopping Cart Domain Models
//!
//! `Cart` holds line items in insertion order plus the active promo code.
//! Its methods are the pure state transitions; persistence and pricing are
//! layered on top by [`CartLedger`](super::ledger::CartLedger).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pricing::PromoTable;
use crate::{
    catalog::models::{Product, ProductId},
    error::PromoCodeError,
};

/// Represents an item in the shopping cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    pub product: Product,

    /// Always at least 1
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartLineItem>,

    /// Normalized (uppercase) code, present iff `discount_percent > 0`
    pub promo_code: Option<String>,

    pub discount_percent: Decimal,
}

impl Cart {
    /// Adds one unit of `product`, merging with an existing line for the same id.
    pub fn add(&mut self, product: Product) {
        if let Some(existing) = self.item_mut(product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            self.items.push(CartLineItem {
                product,
                quantity: 1,
            });
        }
    }

    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Non-positive quantities are ignored rather than removing the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.item_mut(product_id) {
            item.quantity = quantity;
        }
    }

    pub fn increment(&mut self, product_id: ProductId) {
        if let Some(item) = self.item_mut(product_id) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    /// Never goes below 1; use [`Cart::remove`] to drop a line.
    pub fn decrement(&mut self, product_id: ProductId) {
        if let Some(item) = self.item_mut(product_id) {
            if item.quantity > 1 {
                item.quantity -= 1;
            }
        }
    }

    /// Looks `code` up case-insensitively; surrounding whitespace is not
    /// stripped. On a miss the cart is unchanged.
    pub fn apply_promo_code(
        &mut self,
        code: &str,
        promos: &PromoTable,
    ) -> Result<Decimal, PromoCodeError> {
        let normalized = code.to_uppercase();
        let percent = promos
            .lookup(&normalized)
            .ok_or_else(|| PromoCodeError(code.to_string()))?;
        self.promo_code = Some(normalized);
        self.discount_percent = percent;
        Ok(percent)
    }

    pub fn remove_promo_code(&mut self) {
        self.promo_code = None;
        self.discount_percent = Decimal::ZERO;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.remove_promo_code();
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|i| i.product.id == product_id)
    }

    /// Quantity of `product_id` in the cart, 0 when absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Sum of all line quantities, saturating at `u64::MAX`.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, i| total.saturating_add(u64::from(i.quantity)))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks the invariants a loaded cart must satisfy: positive quantities,
    /// one line per product, and a promo state that matches `promos`.
    pub fn is_consistent(&self, promos: &PromoTable) -> bool {
        let positive = self.items.iter().all(|i| i.quantity >= 1);
        let unique = self
            .items
            .iter()
            .enumerate()
            .all(|(idx, item)| {
                self.items[..idx]
                    .iter()
                    .all(|earlier| earlier.product.id != item.product.id)
            });
        let promo = match &self.promo_code {
            Some(code) => promos.lookup(code) == Some(self.discount_percent),
            None => self.discount_percent.is_zero(),
        };
        positive && unique && promo
    }

    fn item_mut(&mut self, product_id: ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|i| i.product.id == product_id)
    }
}

/// Produces a human-readable one-line summary for a cart.
///
/// Example output: `"2x Backpack, 1x Gold Ring"`.
pub fn format_item_summary(items: &[CartLineItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.product.title))
        .collect::<Vec<_>>()
        .join(", ")
}
