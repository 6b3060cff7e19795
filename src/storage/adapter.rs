use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{mpsc, oneshot};

use super::store::KeyValueStore;
use crate::{cart::models::Cart, error::StorageError, theme::Theme, wishlist::set::WishlistSet};

pub const CART_KEY: &str = "shopsmart_cart";
pub const WISHLIST_KEY: &str = "shopsmart_wishlist";
pub const THEME_KEY: &str = "shopsmart_theme";

enum WriteCommand {
    Set { key: &'static str, value: String },
    Flush(oneshot::Sender<()>),
}

/// Loads and saves whole-state blobs under fixed keys.
///
/// Loads return `None` on absence or corruption; saves log failures and
/// carry on. Neither ever surfaces an error to the caller.
///
/// With a background writer, saves only enqueue the serialized blob and a
/// single task applies them in order on the blocking pool.
#[derive(Clone)]
pub struct PersistenceAdapter {
    store: Arc<dyn KeyValueStore>,
    writer: Option<mpsc::UnboundedSender<WriteCommand>>,
}

impl PersistenceAdapter {
    /// Saves are written inline. Suited to stores that never block.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            writer: None,
        }
    }

    /// Saves are handed to a writer task. Must be called inside a tokio runtime.
    pub fn with_background_writer(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store.clone(), rx));
        Self {
            store,
            writer: Some(tx),
        }
    }

    /// Waits until every save enqueued so far has reached the store.
    pub async fn flush(&self) {
        let Some(writer) = &self.writer else {
            return;
        };
        let (done_tx, done_rx) = oneshot::channel();
        if writer.send(WriteCommand::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    pub fn load_cart(&self) -> Option<Cart> {
        self.load_json(CART_KEY)
    }

    pub fn save_cart(&self, cart: &Cart) {
        self.save_json(CART_KEY, cart);
    }

    pub fn load_wishlist(&self) -> Option<WishlistSet> {
        self.load_json(WISHLIST_KEY)
    }

    pub fn save_wishlist(&self, wishlist: &WishlistSet) {
        self.save_json(WISHLIST_KEY, wishlist);
    }

    /// The theme is stored as a bare `light`/`dark` string.
    pub fn load_theme(&self) -> Option<Theme> {
        let raw = self.load_raw(THEME_KEY)?;
        match raw.trim().parse() {
            Ok(theme) => Some(theme),
            Err(_) => {
                tracing::warn!(key = THEME_KEY, value = %raw, "Ignoring unknown persisted theme");
                None
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) {
        self.save_raw(THEME_KEY, theme.as_str());
    }

    fn load_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted state");
                None
            }
        }
    }

    fn save_raw(&self, key: &'static str, value: &str) {
        if let Some(writer) = &self.writer {
            let command = WriteCommand::Set {
                key,
                value: value.to_string(),
            };
            match writer.send(command) {
                Ok(()) => return,
                Err(_) => {
                    let e = StorageError::Writer("channel closed".into());
                    tracing::warn!(key, error = %e, "Writing state inline");
                }
            }
        }
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key, error = %e, "Failed to persist state");
        }
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.load_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding corrupt persisted state");
                None
            }
        }
    }

    fn save_json<T: Serialize>(&self, key: &'static str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.save_raw(key, &json),
            Err(e) => tracing::warn!(key, error = %e, "Failed to serialize state"),
        }
    }
}

async fn run_writer(store: Arc<dyn KeyValueStore>, mut rx: mpsc::UnboundedReceiver<WriteCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            WriteCommand::Set { key, value } => {
                let store = store.clone();
                let result = tokio::task::spawn_blocking(move || store.set(key, &value))
                    .await
                    .unwrap_or_else(|e| Err(StorageError::Writer(e.to_string())));
                if let Err(e) = result {
                    tracing::warn!(key, error = %e, "Failed to persist state");
                }
            }
            WriteCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!("Persistence writer stopped");
}
