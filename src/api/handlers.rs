//! API Handlers
//!
//! HTTP request handlers for the cache monitoring and maintenance endpoints.

use axum::{
    extract::{Path, State},
    http::Uri,
    Json,
};
use tracing::info;

use crate::config::Config;
use crate::domain::PropertyCache;
use crate::error::{ApiError, Result};
use crate::models::{HealthResponse, KeysResponse, RemovedResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// The property cache is itself a shared handle, so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub cache: PropertyCache,
}

impl AppState {
    pub fn new(cache: PropertyCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(PropertyCache::new(&config.cache))
    }

    fn enabled_cache(&self) -> Result<&PropertyCache> {
        if self.cache.is_enabled() {
            Ok(&self.cache)
        } else {
            Err(ApiError::CacheDisabled)
        }
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.cache.get_stats()))
}

/// Handler for GET /cache/keys
///
/// Reports how many entries each category currently holds.
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse::from_counts(&state.cache.key_counts()))
}

/// Handler for POST /cache/cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Result<Json<RemovedResponse>> {
    let removed = state.enabled_cache()?.cleanup_expired();
    Ok(Json(RemovedResponse::new("Expired entries removed", removed)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<RemovedResponse>> {
    let cache = state.enabled_cache()?;
    let removed = cache.cache().len();
    cache.clear();
    info!(removed, "cache cleared");
    Ok(Json(RemovedResponse::new("Cache cleared", removed)))
}

/// Handler for DELETE /cache/properties/:id
///
/// Drops the property and every search, filter and statistics entry.
pub async fn invalidate_property_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RemovedResponse>> {
    let id: u64 = id
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("Invalid property id '{}'", id)))?;

    let removed = state.enabled_cache()?.invalidate_property(id);
    Ok(Json(RemovedResponse::new(
        format!("Property {} invalidated", id),
        removed,
    )))
}

/// Handler for DELETE /cache/search
pub async fn invalidate_search_handler(
    State(state): State<AppState>,
) -> Result<Json<RemovedResponse>> {
    let removed = state.enabled_cache()?.invalidate_search_results();
    Ok(Json(RemovedResponse::new("Search results invalidated", removed)))
}

/// Handler for DELETE /cache/statistics
pub async fn invalidate_statistics_handler(
    State(state): State<AppState>,
) -> Result<Json<RemovedResponse>> {
    let removed = state.enabled_cache()?.invalidate_statistics();
    Ok(Json(RemovedResponse::new("Statistics invalidated", removed)))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.is_enabled()))
}

/// Fallback for unknown routes.
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
