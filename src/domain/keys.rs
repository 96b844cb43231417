//! Cache key layout, one prefix per category.

use serde::Serialize;

pub const PROPERTY_PREFIX: &str = "property:";
pub const SEARCH_PREFIX: &str = "search:";
pub const FILTER_PREFIX: &str = "filter:";
pub const STATS_PREFIX: &str = "stats:";

// == Category ==
/// The four kinds of values held by the property cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Property,
    Search,
    Filter,
    Statistics,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Property,
        Category::Search,
        Category::Filter,
        Category::Statistics,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Category::Property => PROPERTY_PREFIX,
            Category::Search => SEARCH_PREFIX,
            Category::Filter => FILTER_PREFIX,
            Category::Statistics => STATS_PREFIX,
        }
    }

    /// Category owning `key`, from its prefix.
    pub fn of_key(key: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|category| key.starts_with(category.prefix()))
    }
}

pub fn property(id: u64) -> String {
    format!("{PROPERTY_PREFIX}{id}")
}

pub fn search(query: &str, limit: usize) -> String {
    format!("{SEARCH_PREFIX}{query}:limit:{limit}")
}

/// Prices are rendered without decimals.
pub fn filter(province: &str, min_price: f64, max_price: f64) -> String {
    format!("{FILTER_PREFIX}province:{province}:price:{min_price:.0}-{max_price:.0}")
}

pub fn statistics(name: &str) -> String {
    format!("{STATS_PREFIX}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        assert_eq!(property(42), "property:42");
        assert_eq!(search("sea view", 20), "search:sea view:limit:20");
        assert_eq!(
            filter("Madrid", 100000.0, 250000.49),
            "filter:province:Madrid:price:100000-250000"
        );
        assert_eq!(statistics("by_province"), "stats:by_province");
    }

    #[test]
    fn test_category_of_key() {
        assert_eq!(Category::of_key("property:1"), Some(Category::Property));
        assert_eq!(Category::of_key("search:x:limit:5"), Some(Category::Search));
        assert_eq!(Category::of_key("filter:province:a:price:0-1"), Some(Category::Filter));
        assert_eq!(Category::of_key("stats:total"), Some(Category::Statistics));
        assert_eq!(Category::of_key("image:1"), None);
    }
}
