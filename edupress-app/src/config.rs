//! App configuration

use serde::Deserialize;

/// Connection details for the remote backend
#[derive(Clone, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Remote backend; `None` runs the app on fixtures only
    pub backend: Option<BackendConfig>,

    /// Timeout for a single backend request
    pub backend_timeout_secs: u64,

    /// SQLite file holding the session snapshot; in-memory when unset
    pub snapshot_db: Option<String>,

    /// bcrypt cost factor for new passwords
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            backend: None,
            backend_timeout_secs: 10,
            snapshot_db: None,
            bcrypt_cost: crate::crypto::BCRYPT_COST,
        }
    }
}

impl Config {
    /// Load configuration from `EDUPRESS_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match (get("EDUPRESS_BACKEND_URL"), get("EDUPRESS_BACKEND_API_KEY")) {
            (Some(url), Some(api_key)) => Some(BackendConfig {
                url: url.trim_end_matches('/').to_string(),
                api_key,
            }),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Only one of EDUPRESS_BACKEND_URL and EDUPRESS_BACKEND_API_KEY is set; \
                     running on fixture data"
                );
                None
            }
        };

        Self {
            port: parse_or(get("EDUPRESS_PORT"), defaults.port),
            backend,
            backend_timeout_secs: parse_or(
                get("EDUPRESS_BACKEND_TIMEOUT_SECS"),
                defaults.backend_timeout_secs,
            ),
            snapshot_db: get("EDUPRESS_SNAPSHOT_DB"),
            bcrypt_cost: parse_or(get("EDUPRESS_BCRYPT_COST"), defaults.bcrypt_cost),
        }
    }

    /// Demo mode: no backend configured, every read is served from fixtures
    pub fn demo_mode(&self) -> bool {
        self.backend.is_none()
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    match value {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %v, "Ignoring unparsable configuration value");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_are_demo_mode() {
        let config = config(&[]);
        assert!(config.demo_mode());
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend_timeout_secs, 10);
        assert!(config.snapshot_db.is_none());
    }

    #[test]
    fn test_backend_needs_both_values() {
        assert!(config(&[("EDUPRESS_BACKEND_URL", "https://db.example.com")]).demo_mode());
        assert!(config(&[("EDUPRESS_BACKEND_API_KEY", "key")]).demo_mode());

        let config = config(&[
            ("EDUPRESS_BACKEND_URL", "https://db.example.com/"),
            ("EDUPRESS_BACKEND_API_KEY", "key"),
        ]);
        assert!(!config.demo_mode());
        assert_eq!(config.backend.unwrap().url, "https://db.example.com");
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let config = config(&[
            ("EDUPRESS_BACKEND_URL", "  "),
            ("EDUPRESS_BACKEND_API_KEY", "key"),
        ]);
        assert!(config.demo_mode());
    }

    #[test]
    fn test_unparsable_port_falls_back() {
        let config = config(&[("EDUPRESS_PORT", "eighty"), ("EDUPRESS_BCRYPT_COST", "4")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = config(&[
            ("EDUPRESS_BACKEND_URL", "https://db.example.com"),
            ("EDUPRESS_BACKEND_API_KEY", "super-secret"),
        ]);
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
