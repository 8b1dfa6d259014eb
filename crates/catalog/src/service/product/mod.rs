mod command;
mod hook;
mod query;

pub use self::command::{ProductCommandService, ProductCommandServiceDeps};
pub use self::hook::ProductCacheInvalidator;
pub use self::query::ProductQueryService;

pub(crate) const CACHE_TTL_SECS: i64 = 3600;
pub(crate) const PRODUCT_LIST_PATTERN: &str = "product_list_*";

/// One cache entry per filter combination: the raw query string is part of
/// the key.
pub(crate) fn product_list_cache_key(raw_query: &str) -> String {
    format!("product_list_{raw_query}")
}

pub(crate) fn product_cache_key(product_id: i64) -> String {
    format!("product_{product_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_keys_differ_per_query_string() {
        assert_eq!(product_list_cache_key(""), "product_list_");
        assert_ne!(
            product_list_cache_key("category=1"),
            product_list_cache_key("category=1&price=500000")
        );
    }

    #[test]
    fn detail_key_carries_the_id() {
        assert_eq!(product_cache_key(7), "product_7");
    }
}
