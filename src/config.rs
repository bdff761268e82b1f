use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

// ============================================================================
// Configuration
// ============================================================================
//
// Environment-driven, with logged defaults suitable for a local ScyllaDB.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct Config {
    /// ScyllaDB contact point
    pub scylla_node: String,
    /// Keyspace holding the accounts and enrollments tables
    pub keyspace: String,
    /// Port for the /metrics and /health endpoints
    pub metrics_port: u16,
}

impl Config {
    pub fn load() -> Self {
        Self {
            scylla_node: try_load("SCYLLA_NODE", "127.0.0.1:9042"),
            keyspace: try_load("LOYALTY_KEYSPACE", "loyalty"),
            metrics_port: try_load("METRICS_PORT", "9090"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_environment() {
        let config = Config::load();
        assert!(!config.scylla_node.is_empty());
        assert!(!config.keyspace.is_empty());
        assert!(config.metrics_port > 0);
    }
}
