//! Catalog Query Engine
//!
//! A pure function of `(catalog, query)`: filter, then sort, then slice out
//! one page. Nothing here mutates the catalog or remembers previous queries.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::Product;
use crate::config::DEFAULT_PAGE_SIZE;

/// Key a query can sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Price,
    Rating,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Everything the engine needs to compute one view of the catalog.
///
/// `min_price > max_price` is accepted and simply matches nothing.
/// `sort_order` is ignored when `sort_by` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub search_query: String,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<Decimal>,
    pub sort_by: Option<SortBy>,
    pub sort_order: SortOrder,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            category: None,
            min_price: None,
            max_price: None,
            min_rating: None,
            sort_by: None,
            sort_order: SortOrder::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Result of running a [`Query`] against a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    /// Every matching product, sorted
    pub filtered: Vec<&'a Product>,
    /// The requested page of `filtered`; empty when the page is out of range
    pub page: Vec<&'a Product>,
    /// `max(1, ceil(filtered.len() / page_size))`
    pub total_pages: usize,
}

/// Runs `query` against `catalog`.
pub fn apply<'a>(catalog: &'a [Product], query: &Query) -> CatalogView<'a> {
    let search = query.search_query.to_lowercase();
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    let mut filtered: Vec<&Product> = catalog
        .iter()
        .filter(|p| matches_search(p, &search))
        .filter(|p| category.map_or(true, |c| p.category == c))
        .filter(|p| query.min_price.map_or(true, |min| p.price >= min))
        .filter(|p| query.max_price.map_or(true, |max| p.price <= max))
        .filter(|p| query.min_rating.map_or(true, |min| p.rating.rate >= min))
        .collect();

    if let Some(sort_by) = query.sort_by {
        // `sort_by` is stable, so equal keys keep catalog order in both directions.
        filtered.sort_by(|a, b| {
            let ordering = compare_by(sort_by, a, b);
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let page_size = query.page_size.max(1);
    let total_pages = filtered.len().div_ceil(page_size).max(1);
    let page = page_slice(&filtered, query.page, page_size).to_vec();

    CatalogView {
        filtered,
        page,
        total_pages,
    }
}

/// Case-insensitive substring match on title, description or category.
/// `search` must already be lowercase; a blank query matches everything.
fn matches_search(product: &Product, search: &str) -> bool {
    if search.trim().is_empty() {
        return true;
    }
    product.title.to_lowercase().contains(search)
        || product.description.to_lowercase().contains(search)
        || product.category.to_lowercase().contains(search)
}

fn compare_by(sort_by: SortBy, a: &Product, b: &Product) -> Ordering {
    match sort_by {
        SortBy::Price => a.price.cmp(&b.price),
        SortBy::Rating => a.rating.rate.cmp(&b.rating.rate),
        SortBy::Name => compare_titles(&a.title, &b.title),
    }
}

/// Dictionary-style title ordering: letters compare case-insensitively first,
/// with case only breaking otherwise equal titles.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

fn page_slice<'s, T>(items: &'s [T], page: usize, page_size: usize) -> &'s [T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Rating;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn product(id: u64, title: &str, category: &str, price: &str, rate: &str) -> Product {
        Product {
            id,
            title: title.into(),
            price: dec(price),
            description: format!("Description of {}", title),
            category: category.into(),
            image: format!("https://example.test/{}.jpg", id),
            rating: Rating {
                rate: dec(rate),
                count: 10,
            },
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Backpack", "men's clothing", "109.95", "3.9"),
            product(2, "Slim Fit T-Shirt", "men's clothing", "22.30", "4.1"),
            product(3, "Gold Ring", "jewelery", "168.00", "3.9"),
            product(4, "SSD Drive", "electronics", "109.00", "4.8"),
            product(5, "rain jacket", "women's clothing", "39.99", "3.8"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_query_returns_everything_in_source_order() {
        let catalog = catalog();
        let view = apply(&catalog, &Query::default());

        assert_eq!(ids(&view.filtered), vec![1, 2, 3, 4, 5]);
        assert_eq!(ids(&view.page), vec![1, 2, 3, 4, 5]);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let catalog = catalog();

        let by_title = apply(
            &catalog,
            &Query {
                search_query: "GOLD".into(),
                ..Query::default()
            },
        );
        assert_eq!(ids(&by_title.filtered), vec![3]);

        let by_category = apply(
            &catalog,
            &Query {
                search_query: "Electro".into(),
                ..Query::default()
            },
        );
        assert_eq!(ids(&by_category.filtered), vec![4]);

        let by_description = apply(
            &catalog,
            &Query {
                search_query: "description of rain".into(),
                ..Query::default()
            },
        );
        assert_eq!(ids(&by_description.filtered), vec![5]);
    }

    #[test]
    fn test_whitespace_search_matches_all() {
        let catalog = catalog();
        let view = apply(
            &catalog,
            &Query {
                search_query: "   ".into(),
                ..Query::default()
            },
        );
        assert_eq!(view.filtered.len(), catalog.len());
    }

    #[test]
    fn test_combined_filters_all_hold() {
        let catalog = catalog();
        let query = Query {
            category: Some("men's clothing".into()),
            min_price: Some(dec("20")),
            max_price: Some(dec("110")),
            min_rating: Some(dec("4.0")),
            ..Query::default()
        };
        let view = apply(&catalog, &query);

        assert_eq!(ids(&view.filtered), vec![2]);
        for p in &view.filtered {
            assert_eq!(p.category, "men's clothing");
            assert!(p.price >= dec("20") && p.price <= dec("110"));
            assert!(p.rating.rate >= dec("4.0"));
        }
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = catalog();
        let view = apply(
            &catalog,
            &Query {
                min_price: Some(dec("109.00")),
                max_price: Some(dec("109.95")),
                ..Query::default()
            },
        );
        assert_eq!(ids(&view.filtered), vec![1, 4]);
    }

    #[test]
    fn test_inverted_price_bounds_yield_empty_result() {
        let catalog = catalog();
        let view = apply(
            &catalog,
            &Query {
                min_price: Some(dec("100")),
                max_price: Some(dec("50")),
                ..Query::default()
            },
        );
        assert!(view.filtered.is_empty());
        assert!(view.page.is_empty());
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_sort_by_price_both_directions() {
        let catalog = catalog();
        let asc = apply(
            &catalog,
            &Query {
                sort_by: Some(SortBy::Price),
                ..Query::default()
            },
        );
        assert_eq!(ids(&asc.filtered), vec![2, 5, 4, 1, 3]);

        let desc = apply(
            &catalog,
            &Query {
                sort_by: Some(SortBy::Price),
                sort_order: SortOrder::Desc,
                ..Query::default()
            },
        );
        assert_eq!(ids(&desc.filtered), vec![3, 1, 4, 5, 2]);
    }

    #[test]
    fn test_sort_by_rating_is_stable_for_ties() {
        let catalog = catalog();
        let asc = apply(
            &catalog,
            &Query {
                sort_by: Some(SortBy::Rating),
                ..Query::default()
            },
        );
        // 1 and 3 share 3.9 and keep their catalog order.
        assert_eq!(ids(&asc.filtered), vec![5, 1, 3, 2, 4]);

        let desc = apply(
            &catalog,
            &Query {
                sort_by: Some(SortBy::Rating),
                sort_order: SortOrder::Desc,
                ..Query::default()
            },
        );
        assert_eq!(ids(&desc.filtered), vec![4, 2, 1, 3, 5]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let catalog = catalog();
        let view = apply(
            &catalog,
            &Query {
                sort_by: Some(SortBy::Name),
                ..Query::default()
            },
        );
        assert_eq!(ids(&view.filtered), vec![1, 3, 5, 2, 4]);
    }

    #[test]
    fn test_sort_order_without_sort_key_is_ignored() {
        let catalog = catalog();
        let view = apply(
            &catalog,
            &Query {
                sort_order: SortOrder::Desc,
                ..Query::default()
            },
        );
        assert_eq!(ids(&view.filtered), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_pagination_slices_and_counts_pages() {
        let catalog = catalog();
        let query = |page| Query {
            page,
            page_size: 2,
            ..Query::default()
        };

        let first = apply(&catalog, &query(1));
        assert_eq!(first.total_pages, 3);
        assert_eq!(ids(&first.page), vec![1, 2]);

        let last = apply(&catalog, &query(3));
        assert_eq!(ids(&last.page), vec![5]);

        let beyond = apply(&catalog, &query(4));
        assert!(beyond.page.is_empty());
        assert_eq!(beyond.filtered.len(), 5);

        let zero = apply(&catalog, &query(0));
        assert!(zero.page.is_empty());
    }

    #[test]
    fn test_empty_catalog_has_one_page() {
        let view = apply(&[], &Query::default());
        assert!(view.filtered.is_empty());
        assert_eq!(view.total_pages, 1);
    }
}
