//! REST API handlers for the wishlist

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::ledger::WishlistLedger;
use crate::{
    catalog::models::{Product, ProductId},
    error::ApiResult,
    state::SharedState,
};

/// Creates routes for wishlist operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/wishlist", get(get_wishlist).delete(clear_wishlist))
        .route("/wishlist/items", post(add_item))
        .route("/wishlist/items/:id", delete(remove_item))
        .route("/wishlist/toggle", post(toggle_item))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemInput {
    pub product_id: ProductId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub items: Vec<Product>,
    pub count: usize,
    /// Set by toggle: whether the toggled product is now wishlisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_wishlist: Option<bool>,
}

impl From<&WishlistLedger> for WishlistResponse {
    fn from(ledger: &WishlistLedger) -> Self {
        Self {
            items: ledger.set().items().to_vec(),
            count: ledger.set().len(),
            in_wishlist: None,
        }
    }
}

/// Endpoint: GET /wishlist
async fn get_wishlist(State(state): State<SharedState>) -> Json<WishlistResponse> {
    let wishlist = state.wishlist.lock().await;
    Json(WishlistResponse::from(&*wishlist))
}

/// Endpoint: DELETE /wishlist
async fn clear_wishlist(State(state): State<SharedState>) -> Json<WishlistResponse> {
    let mut wishlist = state.wishlist.lock().await;
    wishlist.clear();
    Json(WishlistResponse::from(&*wishlist))
}

/// Endpoint: POST /wishlist/items
async fn add_item(
    State(state): State<SharedState>,
    Json(payload): Json<WishlistItemInput>,
) -> ApiResult<Json<WishlistResponse>> {
    let product = state.find_product(payload.product_id).await?;

    let mut wishlist = state.wishlist.lock().await;
    wishlist.add(product);
    Ok(Json(WishlistResponse::from(&*wishlist)))
}

/// Endpoint: DELETE /wishlist/items/:id
async fn remove_item(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> Json<WishlistResponse> {
    let mut wishlist = state.wishlist.lock().await;
    wishlist.remove(id);
    Json(WishlistResponse::from(&*wishlist))
}

/// Endpoint: POST /wishlist/toggle
async fn toggle_item(
    State(state): State<SharedState>,
    Json(payload): Json<WishlistItemInput>,
) -> ApiResult<Json<WishlistResponse>> {
    let mut wishlist = state.wishlist.lock().await;

    // A product being removed may have dropped out of the catalog since it
    // was wishlisted, so only resolve it when it has to be added. The lock is
    // released while resolving; the decision to add stands even if another
    // request adds the same product meanwhile.
    let existing = wishlist
        .set()
        .items()
        .iter()
        .find(|p| p.id == payload.product_id)
        .cloned();
    let present = match existing {
        Some(product) => wishlist.toggle(product),
        None => {
            drop(wishlist);
            let product = state.find_product(payload.product_id).await?;
            wishlist = state.wishlist.lock().await;
            wishlist.add(product);
            true
        }
    };

    let mut response = WishlistResponse::from(&*wishlist);
    response.in_wishlist = Some(present);
    Ok(Json(response))
}
