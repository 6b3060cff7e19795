//! Application State
//!
//! The composition root: owns the catalog snapshot, the cart ledger, the
//! wishlist, the theme and the collaborators they depend on. Handlers reach
//! everything through a [`SharedState`] rather than through globals.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, RwLockReadGuard};

use crate::{
    cart::CartLedger,
    catalog::{
        models::{CatalogStatus, Product, ProductId},
        provider::{CatalogProvider, HttpCatalogProvider},
        selectors::{categories_of, product_by_id},
    },
    config::StoreConfig,
    error::{ApiError, ApiResult, CatalogError},
    storage::{FileStore, KeyValueStore, MemoryStore, PersistenceAdapter},
    theme::Theme,
    wishlist::WishlistLedger,
};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Last successfully fetched catalog plus the state of the most recent fetch.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub status: CatalogStatus,
}

pub struct AppState {
    pub config: StoreConfig,
    pub persistence: PersistenceAdapter,
    pub cart: Mutex<CartLedger>,
    pub wishlist: Mutex<WishlistLedger>,
    pub theme: Mutex<Theme>,
    provider: Arc<dyn CatalogProvider>,
    catalog: RwLock<CatalogSnapshot>,
}

impl AppState {
    /// Builds state over explicit collaborators, restoring the cart,
    /// wishlist and theme from `store`. The catalog starts empty and idle.
    pub fn new(
        config: StoreConfig,
        provider: Arc<dyn CatalogProvider>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self::with_persistence(config, provider, PersistenceAdapter::new(store))
    }

    pub fn with_persistence(
        config: StoreConfig,
        provider: Arc<dyn CatalogProvider>,
        persistence: PersistenceAdapter,
    ) -> Self {
        let cart = CartLedger::load(
            persistence.clone(),
            config.pricing,
            config.promo_codes.clone(),
        );
        let wishlist = WishlistLedger::load(persistence.clone());
        let theme = persistence.load_theme().unwrap_or_default();

        Self {
            config,
            persistence,
            cart: Mutex::new(cart),
            wishlist: Mutex::new(wishlist),
            theme: Mutex::new(theme),
            provider,
            catalog: RwLock::new(CatalogSnapshot::default()),
        }
    }

    /// Wires the HTTP product API and either a file store (when a data
    /// directory is configured) or an in-memory one. File writes go through
    /// a background writer, so this must run inside a tokio runtime.
    pub fn from_config(config: StoreConfig) -> anyhow::Result<Self> {
        let provider = HttpCatalogProvider::new(&config.api_base_url, config.api_timeout_secs)?;

        let persistence = match &config.data_dir {
            Some(dir) => {
                let store = FileStore::open(dir)?;
                tracing::info!(dir = %store.dir().display(), "Persisting state to disk");
                PersistenceAdapter::with_background_writer(Arc::new(store))
            }
            None => {
                tracing::info!("No data directory configured, state is kept in memory");
                PersistenceAdapter::new(Arc::new(MemoryStore::new()))
            }
        };

        Ok(Self::with_persistence(config, Arc::new(provider), persistence))
    }

    pub async fn catalog(&self) -> RwLockReadGuard<'_, CatalogSnapshot> {
        self.catalog.read().await
    }

    /// Fetches products and categories from the provider.
    ///
    /// On failure the previous products are kept and the status records the
    /// error. Overlapping refreshes are not deduplicated; the last to finish wins.
    pub async fn refresh_catalog(&self) -> Result<usize, CatalogError> {
        self.catalog.write().await.status = CatalogStatus::Loading;

        let (products, categories) = tokio::join!(
            self.provider.fetch_all_products(),
            self.provider.fetch_categories()
        );

        let mut snapshot = self.catalog.write().await;
        match products {
            Ok(products) => {
                snapshot.categories = categories.unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Category fetch failed, deriving from products");
                    categories_of(&products)
                });
                snapshot.products = products;
                snapshot.status = CatalogStatus::Ready;
                tracing::info!(
                    products = snapshot.products.len(),
                    categories = snapshot.categories.len(),
                    "Catalog loaded"
                );
                Ok(snapshot.products.len())
            }
            Err(e) => {
                tracing::error!(error = %e, "Catalog fetch failed");
                snapshot.status = CatalogStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let products = self.provider.fetch_by_category(category).await?;
        tracing::debug!(category, count = products.len(), "Fetched category");
        Ok(products)
    }

    /// Resolves a product from the snapshot, falling back to the provider
    /// for ids the snapshot does not know.
    pub async fn find_product(&self, id: ProductId) -> ApiResult<Product> {
        if let Some(product) = product_by_id(&self.catalog().await.products, id) {
            return Ok(product.clone());
        }

        match self.provider.fetch_product(id).await {
            Ok(product) => Ok(product),
            Err(CatalogError::ProductNotFound(_)) => {
                Err(ApiError::NotFound(format!("Product {} not found", id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
