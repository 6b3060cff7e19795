//! REST API handlers for shopping cart operations
//!
//! Every response carries the cart together with a freshly computed
//! pricing summary.

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{ledger::CartLedger, models::Cart, pricing::PricingSummary};
use crate::{
    catalog::models::ProductId,
    error::ApiResult,
    state::SharedState,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", put(set_quantity).delete(remove_item))
        .route("/cart/items/:id/increment", post(increment))
        .route("/cart/items/:id/decrement", post(decrement))
        .route("/cart/promo", post(apply_promo).delete(remove_promo))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
pub struct QuantityInput {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct PromoInput {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Cart,
    pub summary: PricingSummary,
}

impl From<&CartLedger> for CartResponse {
    fn from(ledger: &CartLedger) -> Self {
        Self {
            cart: ledger.cart().clone(),
            summary: ledger.summary(),
        }
    }
}

/// Endpoint: GET /cart
async fn get_cart(State(state): State<SharedState>) -> Json<CartResponse> {
    let ledger = state.cart.lock().await;
    Json(CartResponse::from(&*ledger))
}

/// Endpoint: DELETE /cart
async fn clear_cart(State(state): State<SharedState>) -> Json<CartResponse> {
    let mut ledger = state.cart.lock().await;
    ledger.clear();
    Json(CartResponse::from(&*ledger))
}

/// Endpoint: POST /cart/items
/// Adds one unit of a catalog product.
async fn add_item(
    State(state): State<SharedState>,
    Json(payload): Json<AddItemInput>,
) -> ApiResult<Json<CartResponse>> {
    let product = state.find_product(payload.product_id).await?;

    let mut ledger = state.cart.lock().await;
    ledger.add(product);
    Ok(Json(CartResponse::from(&*ledger)))
}

/// Endpoint: PUT /cart/items/:id
/// Non-positive quantities leave the cart unchanged.
async fn set_quantity(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<QuantityInput>,
) -> Json<CartResponse> {
    let mut ledger = state.cart.lock().await;
    ledger.set_quantity(id, payload.quantity);
    Json(CartResponse::from(&*ledger))
}

/// Endpoint: DELETE /cart/items/:id
async fn remove_item(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> Json<CartResponse> {
    let mut ledger = state.cart.lock().await;
    ledger.remove(id);
    Json(CartResponse::from(&*ledger))
}

/// Endpoint: POST /cart/items/:id/increment
async fn increment(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> Json<CartResponse> {
    let mut ledger = state.cart.lock().await;
    ledger.increment(id);
    Json(CartResponse::from(&*ledger))
}

/// Endpoint: POST /cart/items/:id/decrement
async fn decrement(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> Json<CartResponse> {
    let mut ledger = state.cart.lock().await;
    ledger.decrement(id);
    Json(CartResponse::from(&*ledger))
}

/// Endpoint: POST /cart/promo
/// Unknown codes are rejected with 422 and leave the discount untouched.
async fn apply_promo(
    State(state): State<SharedState>,
    Json(payload): Json<PromoInput>,
) -> ApiResult<Json<CartResponse>> {
    let mut ledger = state.cart.lock().await;
    ledger.apply_promo_code(&payload.code)?;
    Ok(Json(CartResponse::from(&*ledger)))
}

/// Endpoint: DELETE /cart/promo
async fn remove_promo(State(state): State<SharedState>) -> Json<CartResponse> {
    let mut ledger = state.cart.lock().await;
    ledger.remove_promo_code();
    Json(CartResponse::from(&*ledger))
}
