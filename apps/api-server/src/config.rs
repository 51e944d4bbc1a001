//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use postboard_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the service on the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let database = var("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .map(|url| DatabaseConfig {
                url,
                database_name: var("DB_NAME").unwrap_or_else(|| "mydb".to_string()),
                max_connections: parsed(&var, "DB_MAX_CONNECTIONS").unwrap_or(100),
                min_connections: parsed(&var, "DB_MIN_CONNECTIONS").unwrap_or(10),
            });

        Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&var, "PORT").unwrap_or(3000),
            database,
        }
    }
}

/// Read `key` and parse it, ignoring values that do not parse.
fn parsed<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    var(key).and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.database.is_none());
    }

    #[test]
    fn database_settings() {
        let config = config(&[
            ("DATABASE_URL", "mongodb://mongo-service:27017/mydb"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("PORT", "8080"),
        ]);

        assert_eq!(config.port, 8080);
        let db = config.database.unwrap();
        assert_eq!(db.url, "mongodb://mongo-service:27017/mydb");
        assert_eq!(db.database_name, "mydb");
        assert_eq!(db.max_connections, 20);
        assert_eq!(db.min_connections, 10);
    }

    #[test]
    fn port_and_pool_sizes_parse_independently() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/posts"),
            ("PORT", "65535"),
            ("DB_MIN_CONNECTIONS", "70000"),
        ]);

        assert_eq!(config.port, 65535);
        assert_eq!(config.database.unwrap().min_connections, 70000);
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let config = config(&[("PORT", "eighty"), ("DATABASE_URL", "")]);
        assert_eq!(config.port, 3000);
        assert!(config.database.is_none());
    }
}
