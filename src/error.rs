//! Error types for the storefront
//!
//! Each concern gets its own `thiserror` enum. `ApiError` is the only one
//! that crosses the HTTP boundary; the others are mapped into it (or logged
//! and swallowed, in the case of persistence failures).

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Failures talking to the remote product API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure or non-success status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body could not be decoded into the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Product id unknown to the API
    #[error("Product {0} not found")]
    ProductNotFound(u64),
}

/// Failures reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The background writer is gone or its task panicked
    #[error("Persistence writer unavailable: {0}")]
    Writer(String),
}

/// Rejection of a promo code that is not in the promo table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid promo code: {0}")]
pub struct PromoCodeError(pub String);

/// Errors returned to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    InvalidPromoCode(#[from] PromoCodeError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidPromoCode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Catalog(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
