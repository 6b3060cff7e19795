use serde::{Deserialize, Serialize};

use crate::catalog::models::{Product, ProductId};

/// Products the shopper wants to keep an eye on, unique by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WishlistSet {
    items: Vec<Product>,
}

impl WishlistSet {
    /// Builds a set from a list, dropping later duplicates.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut set = Self::default();
        for product in products {
            set.add(product);
        }
        set
    }

    /// Returns `false` if a product with the same id is already present.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != product_id);
        self.items.len() != before
    }

    /// Removes the product if present, adds it otherwise.
    /// Returns whether it is in the set afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        match self.items.iter().position(|p| p.id == product.id) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(product);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Rating;
    use rust_decimal::Decimal;

    fn product(id: u64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price: Decimal::from(5),
            description: String::new(),
            category: "misc".into(),
            image: String::new(),
            rating: Rating {
                rate: Decimal::from(4),
                count: 2,
            },
        }
    }

    #[test]
    fn test_add_is_deduplicated_by_id() {
        let mut set = WishlistSet::default();
        assert!(set.add(product(1)));
        assert!(!set.add(product(1)));
        assert!(set.add(product(2)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut set = WishlistSet::from_products([product(1), product(2)]);
        let before = set.clone();

        assert!(!set.toggle(product(1)));
        assert!(!set.contains(1));
        assert!(set.toggle(product(1)));
        assert!(set.contains(1));

        let mut ids: Vec<u64> = set.items().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);

        assert!(set.toggle(product(3)));
        assert!(!set.toggle(product(3)));
        assert_eq!(set.len(), before.len());
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let set = WishlistSet::from_products([product(3), product(1), product(3), product(2)]);
        let ids: Vec<u64> = set.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut set = WishlistSet::from_products([product(1), product(2)]);
        assert!(set.remove(1));
        assert!(!set.remove(1));
        set.clear();
        assert!(set.is_empty());
    }
}
