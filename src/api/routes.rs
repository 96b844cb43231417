//! API Routes
//!
//! Configures the Axum router with the cache service endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, clear_handler, health_handler, invalidate_property_handler,
    invalidate_search_handler, invalidate_statistics_handler, keys_handler, not_found_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check
/// - `GET /stats` - Global and per-category cache statistics
/// - `GET /cache/keys` - Entry counts per category
/// - `POST /cache/cleanup` - Remove expired entries now
/// - `DELETE /cache` - Clear the cache and category counters
/// - `DELETE /cache/properties/:id` - Invalidate a property and derived entries
/// - `DELETE /cache/search` - Invalidate search and filter results
/// - `DELETE /cache/statistics` - Invalidate statistics
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/keys", get(keys_handler))
        .route("/cache/cleanup", post(cleanup_handler))
        .route("/cache/properties/:id", delete(invalidate_property_handler))
        .route("/cache/search", delete(invalidate_search_handler))
        .route("/cache/statistics", delete(invalidate_statistics_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
