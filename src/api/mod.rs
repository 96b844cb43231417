//! API Module
//!
//! HTTP handlers and routing for cache monitoring and maintenance.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics with per-category breakdown
//! - `GET /cache/keys` - Entry counts per category
//! - `POST /cache/cleanup` - Sweep expired entries
//! - `DELETE /cache` - Clear the cache
//! - `DELETE /cache/properties/:id` - Cascading property invalidation
//! - `DELETE /cache/search` - Invalidate search and filter results
//! - `DELETE /cache/statistics` - Invalidate statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
