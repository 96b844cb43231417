//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::domain::{Category, DomainCacheStats};

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Global and per-category statistics
    #[serde(flatten)]
    pub stats: DomainCacheStats,
    /// Snapshot time in ISO 8601 format
    pub timestamp: String,
}

impl StatsResponse {
    pub fn new(stats: DomainCacheStats) -> Self {
        Self {
            stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for GET /cache/keys
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeysResponse {
    pub total: usize,
    pub property: usize,
    pub search: usize,
    pub filter: usize,
    pub statistics: usize,
}

impl KeysResponse {
    /// Builds the response from per-category counts.
    pub fn from_counts(counts: &[(Category, usize)]) -> Self {
        let mut resp = Self::default();
        for &(category, count) in counts {
            resp.total += count;
            match category {
                Category::Property => resp.property = count,
                Category::Search => resp.search = count,
                Category::Filter => resp.filter = count,
                Category::Statistics => resp.statistics = count,
            }
        }
        resp
    }
}

/// Response body for cache maintenance operations
/// (cleanup, clear and invalidation endpoints)
#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    /// What was done
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl RemovedResponse {
    pub fn new(message: impl Into<String>, removed: usize) -> Self {
        Self {
            message: message.into(),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Whether caching is enabled
    pub cache_enabled: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache_enabled: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            cache_enabled,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CategoryStats;

    #[test]
    fn test_stats_response_flattens_cache_stats() {
        let stats = DomainCacheStats {
            enabled: true,
            search: CategoryStats::new(3, 1),
            ..Default::default()
        };
        let json = serde_json::to_value(StatsResponse::new(stats)).unwrap();

        assert_eq!(json["enabled"], true);
        assert_eq!(json["hits"], 0);
        assert_eq!(json["hit_rate"], 0.0);
        assert_eq!(json["max_size"], 0);
        assert_eq!(json["search"]["hit_rate"], 75.0);
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_keys_response_from_counts() {
        let resp = KeysResponse::from_counts(&[
            (Category::Property, 3),
            (Category::Search, 2),
            (Category::Filter, 0),
            (Category::Statistics, 1),
        ]);
        assert_eq!(resp.total, 6);
        assert_eq!(resp.property, 3);
        assert_eq!(resp.search, 2);
        assert_eq!(resp.statistics, 1);
    }

    #[test]
    fn test_removed_response_serialize() {
        let json = serde_json::to_string(&RemovedResponse::new("Expired entries removed", 4)).unwrap();
        assert!(json.contains("\"removed\":4"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(true);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
