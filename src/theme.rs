//! Theme preference
//!
//! Not part of the catalog or pricing logic, but persisted through the same
//! adapter and exposed next to the cart and wishlist routes.

use std::{fmt, str::FromStr};

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::state::SharedState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemePayload {
    pub theme: Theme,
}

/// Creates routes for the theme preference
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/theme", get(get_theme).put(set_theme))
        .route("/theme/toggle", post(toggle_theme))
}

/// Endpoint: GET /theme
async fn get_theme(State(state): State<SharedState>) -> Json<ThemePayload> {
    let theme = *state.theme.lock().await;
    Json(ThemePayload { theme })
}

/// Endpoint: PUT /theme
async fn set_theme(
    State(state): State<SharedState>,
    Json(payload): Json<ThemePayload>,
) -> Json<ThemePayload> {
    let mut theme = state.theme.lock().await;
    *theme = payload.theme;
    state.persistence.save_theme(*theme);
    Json(ThemePayload { theme: *theme })
}

/// Endpoint: POST /theme/toggle
async fn toggle_theme(State(state): State<SharedState>) -> Json<ThemePayload> {
    let mut theme = state.theme.lock().await;
    *theme = theme.toggled();
    state.persistence.save_theme(*theme);
    tracing::debug!(theme = theme.as_str(), "Theme toggled");
    Json(ThemePayload { theme: *theme })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_an_involution() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_parse_only_known_names() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("Dark".parse::<Theme>().is_err());
    }
}
