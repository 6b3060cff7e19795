//! Cart pricing
//!
//! Derivation order is fixed:
//!
//! ```text
//! subtotal              = Σ price × quantity
//! discount              = subtotal × discount% / 100
//! subtotal_after        = subtotal − discount
//! tax                   = subtotal_after × tax_rate
//! shipping              = 0 if subtotal_after ≥ threshold else standard cost
//! total                 = subtotal_after + tax + shipping
//! ```
//!
//! Only the final figures are rounded (2 places, half away from zero).

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::models::Cart;

const DECIMAL_PLACES: u32 = 2;

/// Tax and shipping constants used by [`summarize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingConfig {
    /// Fraction, e.g. 0.08 for 8%
    pub tax_rate: Decimal,
    pub free_shipping_threshold: Decimal,
    pub standard_shipping_cost: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            free_shipping_threshold: Decimal::from(100),
            standard_shipping_cost: Decimal::from(10),
        }
    }
}

/// Promo codes and the discount percentage each grants. Keys are uppercase.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoTable {
    codes: BTreeMap<String, Decimal>,
}

impl PromoTable {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .filter(|(_, percent)| *percent > Decimal::ZERO && *percent <= Decimal::ONE_HUNDRED)
                .map(|(code, percent)| (code.as_ref().to_uppercase(), percent))
                .collect(),
        }
    }

    /// Exact lookup of an already-normalized code.
    pub fn lookup(&self, code: &str) -> Option<Decimal> {
        self.codes.get(code).copied()
    }

}

impl Default for PromoTable {
    fn default() -> Self {
        Self::new([
            ("SAVE10", Decimal::from(10)),
            ("SAVE20", Decimal::from(20)),
            ("WELCOME15", Decimal::from(15)),
            ("NEWYEAR25", Decimal::from(25)),
        ])
    }
}

/// Derived totals for a cart. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub item_count: u64,
}

/// Computes the pricing summary for `cart`.
pub fn summarize(cart: &Cart, config: &PricingConfig) -> PricingSummary {
    let subtotal: Decimal = cart
        .items
        .iter()
        .map(|i| i.product.price * Decimal::from(i.quantity))
        .sum();

    let discount = subtotal * cart.discount_percent / Decimal::ONE_HUNDRED;
    let subtotal_after_discount = subtotal - discount;
    let tax = subtotal_after_discount * config.tax_rate;
    let shipping = if subtotal_after_discount >= config.free_shipping_threshold {
        Decimal::ZERO
    } else {
        config.standard_shipping_cost
    };
    let total = subtotal_after_discount + tax + shipping;

    PricingSummary {
        subtotal: round_money(subtotal),
        tax: round_money(tax),
        discount: round_money(discount),
        shipping: round_money(shipping),
        total: round_money(total),
        item_count: cart.item_count(),
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
