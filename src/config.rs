//! Storefront configuration
//!
//! All values can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | STOREFRONT_PORT | 8000 | HTTP listen port |
//! | CATALOG_API_URL | https://fakestoreapi.com | Product API base URL |
//! | CATALOG_TIMEOUT_SECS | 10 | Product API request timeout |
//! | STOREFRONT_DATA_DIR | (unset) | Directory for persisted state; in-memory when unset |
//! | LOG_LEVEL | info | Default tracing filter |
//! | LOG_JSON | false | Emit JSON log lines |
//! | TAX_RATE | 0.08 | Tax applied after discount |
//! | FREE_SHIPPING_THRESHOLD | 100 | Discounted subtotal at which shipping is free |
//! | STANDARD_SHIPPING_COST | 10 | Shipping below the threshold |
//! | DEFAULT_PAGE_SIZE | 12 | Page size when a query omits one |

use std::{path::PathBuf, str::FromStr};

use rust_decimal::Decimal;

use crate::cart::pricing::{PricingConfig, PromoTable};

pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub port: u16,
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub log_json: bool,
    pub pricing: PricingConfig,
    pub promo_codes: PromoTable,
    pub default_page_size: usize,
}

impl StoreConfig {
    /// Loads configuration from the environment, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = PricingConfig::default();
        Self {
            port: env_parse("STOREFRONT_PORT").unwrap_or(8000),
            api_base_url: std::env::var("CATALOG_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.into()),
            api_timeout_secs: env_parse("CATALOG_TIMEOUT_SECS").unwrap_or(10),
            data_dir: std::env::var("STOREFRONT_DATA_DIR").ok().map(PathBuf::from),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            pricing: PricingConfig {
                tax_rate: env_parse::<Decimal>("TAX_RATE").unwrap_or(defaults.tax_rate),
                free_shipping_threshold: env_parse::<Decimal>("FREE_SHIPPING_THRESHOLD")
                    .unwrap_or(defaults.free_shipping_threshold),
                standard_shipping_cost: env_parse::<Decimal>("STANDARD_SHIPPING_COST")
                    .unwrap_or(defaults.standard_shipping_cost),
            },
            promo_codes: PromoTable::default(),
            default_page_size: env_parse::<usize>("DEFAULT_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            api_base_url: DEFAULT_API_URL.into(),
            api_timeout_secs: 10,
            data_dir: None,
            log_level: "info".into(),
            log_json: false,
            pricing: PricingConfig::default(),
            promo_codes: PromoTable::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
