//! Environment variable names used by this crate for convenient
//! configuration of the sink from a crawler process.
//!
//! These are purely helpers; [`EsWriter`](crate::elastic::EsWriter) itself
//! is configured through its constructor.

/// Base URL of the target index, e.g. `http://127.0.0.1:9200/properties/property`.
pub const ES_PIPELINE_URL_ENV: &str = "ES_PIPELINE_URL";

/// Optional `tracing` filter directive, e.g. `es_item_sink=debug`.
pub const ES_SINK_LOG_ENV: &str = "ES_SINK_LOG";

/// Read an environment variable, treating unset and empty the same way.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back() {
        let key = "ES_ITEM_SINK_TEST_UNSET_VARIABLE";
        assert_eq!(env_opt(key), None);
        assert_eq!(env_or(key, "fallback"), "fallback");
    }
}
