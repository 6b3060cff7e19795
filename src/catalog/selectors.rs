//! Derived views over the catalog snapshot
//!
//! Plain functions recomputed on demand; none of them cache.

use rust_decimal::Decimal;

use super::models::{PriceRange, Product, ProductId};

/// Minimum rating for a product to be featured
pub const FEATURED_MIN_RATING: Decimal = Decimal::from_parts(40, 0, 0, false, 1);
/// Maximum number of featured products
pub const FEATURED_LIMIT: usize = 8;

pub fn product_by_id(catalog: &[Product], id: ProductId) -> Option<&Product> {
    catalog.iter().find(|p| p.id == id)
}

/// Highly rated products, in catalog order.
pub fn featured_products(catalog: &[Product]) -> Vec<&Product> {
    catalog
        .iter()
        .filter(|p| p.rating.rate >= FEATURED_MIN_RATING)
        .take(FEATURED_LIMIT)
        .collect()
}

/// Price bounds for filter controls: the lowest price rounded down and the
/// highest rounded up to whole units. An empty catalog yields `0..0`.
pub fn price_range(catalog: &[Product]) -> PriceRange {
    let min = catalog.iter().map(|p| p.price).min();
    let max = catalog.iter().map(|p| p.price).max();
    match (min, max) {
        (Some(min), Some(max)) => PriceRange {
            min: min.floor(),
            max: max.ceil(),
        },
        _ => PriceRange {
            min: Decimal::ZERO,
            max: Decimal::ZERO,
        },
    }
}

/// Distinct categories in first-seen order, used when the provider's
/// category list is unavailable.
pub fn categories_of(catalog: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in catalog {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Rating;

    fn product(id: u64, price: &str, rate: &str, category: &str) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price: price.parse().unwrap(),
            description: String::new(),
            category: category.into(),
            image: String::new(),
            rating: Rating {
                rate: rate.parse().unwrap(),
                count: 1,
            },
        }
    }

    #[test]
    fn test_featured_keeps_order_and_limit() {
        let catalog: Vec<Product> = (1..=12)
            .map(|id| product(id, "10", if id % 3 == 0 { "3.5" } else { "4.0" }, "misc"))
            .collect();

        let featured = featured_products(&catalog);
        let ids: Vec<u64> = featured.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5, 7, 8, 10, 11]);
    }

    #[test]
    fn test_price_range_rounds_outwards() {
        let catalog = vec![
            product(1, "7.95", "4", "a"),
            product(2, "999.99", "4", "b"),
            product(3, "55.5", "4", "a"),
        ];
        let range = price_range(&catalog);
        assert_eq!(range.min, Decimal::from(7));
        assert_eq!(range.max, Decimal::from(1000));

        let empty = price_range(&[]);
        assert_eq!(empty.min, Decimal::ZERO);
        assert_eq!(empty.max, Decimal::ZERO);
    }

    #[test]
    fn test_lookup_and_categories() {
        let catalog = vec![
            product(1, "1", "4", "electronics"),
            product(2, "1", "4", "jewelery"),
            product(3, "1", "4", "electronics"),
        ];
        assert_eq!(product_by_id(&catalog, 2).map(|p| p.id), Some(2));
        assert!(product_by_id(&catalog, 9).is_none());
        assert_eq!(categories_of(&catalog), vec!["electronics", "jewelery"]);
    }
}
