//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{code}`         - Short link redirect
//! - `GET    /health`         - Health check: storage, click queue
//! - `POST   /shorten`        - Create a short link
//! - `PUT    /shorten/{code}` - Replace a short link's destination
//! - `DELETE /shorten/{code}` - Delete a short link
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Browser access for the configured origins
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the application router with every route, CORS and the tracing layer.
///
/// CORS origins are read from the configuration once, here; changing them
/// requires a restart.
///
/// Static routes (`/health`, `/shorten`) take precedence over the `/{code}`
/// capture, so those names can never resolve as short codes.
pub fn build_router(state: AppState) -> Router {
    let cors = cors::layer(&state.config.load().cors_allowed_origins);

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::shorten_routes())
        .with_state(state)
        .layer(cors)
        .layer(tracing::layer())
}

/// Constructs the servable application: [`build_router`] wrapped so that
/// `/shorten/` and `/promo/` match the same routes as their slash-less forms.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
