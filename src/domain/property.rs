//! Property Records
//!
//! Records handed to the cache by the property and search services, with
//! the byte-size estimates used for cache accounting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bytes charged for a record's fixed-width fields (ids, prices, counts, timestamps).
pub const PROPERTY_BASE_SIZE: u64 = 128;

/// Bytes charged per search hit on top of its property, for the score.
pub const SEARCH_RESULT_OVERHEAD: u64 = 8;

/// Precomputed aggregate counts, keyed by metric name.
pub type PropertyStatistics = Map<String, Value>;

// == Property ==
/// A property listing as stored by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub province: String,
    pub city: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area_sqm: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Approximate memory cost of the record.
    ///
    /// Counts the variable-length text fields plus the serialized tag and
    /// image lists on top of a fixed base; not an exact measurement.
    pub fn estimated_size(&self) -> u64 {
        let text = self.title.len()
            + self.description.len()
            + self.province.len()
            + self.city.len()
            + json_len(&self.tags)
            + json_len(&self.images);
        PROPERTY_BASE_SIZE + text as u64
    }
}

// == Search Result ==
/// A ranked hit returned by full-text search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub property: Property,
    pub score: f64,
}

impl SearchResult {
    pub fn estimated_size(&self) -> u64 {
        self.property.estimated_size() + SEARCH_RESULT_OVERHEAD
    }
}

/// Estimated size of a ranked result set.
pub fn search_results_size(results: &[SearchResult]) -> u64 {
    results.iter().map(SearchResult::estimated_size).sum()
}

/// Estimated size of a filtered property list.
pub fn properties_size(properties: &[Property]) -> u64 {
    properties.iter().map(Property::estimated_size).sum()
}

/// Estimated size of a statistics blob: its JSON length.
pub fn statistics_size(stats: &PropertyStatistics) -> u64 {
    json_len(stats) as u64
}

fn json_len<T: Serialize + ?Sized>(value: &T) -> usize {
    serde_json::to_vec(value).map(|bytes| bytes.len()).unwrap_or(0)
}
