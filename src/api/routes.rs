//! Shorten API route configuration.

use crate::api::handlers::{
    create_shorten_handler, delete_shorten_handler, missing_code_handler, update_shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{post, put},
};

/// Link management routes.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Create a short link
/// - `PUT    /shorten/{code}` - Replace the destination of a short link
/// - `DELETE /shorten/{code}` - Delete a short link
///
/// `PUT` and `DELETE` on `/shorten` without a code answer 400.
pub fn shorten_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shorten",
            post(create_shorten_handler)
                .put(missing_code_handler)
                .delete(missing_code_handler),
        )
        .route(
            "/shorten/{code}",
            put(update_shorten_handler).delete(delete_shorten_handler),
        )
}
