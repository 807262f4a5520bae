//! Configuration schema definitions.
//!
//! This module defines the route table file structure.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration: the route table plus logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Route definitions, registered in file order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A single `(pattern, handler)` registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route pattern, e.g. `/users/:id` or `/static/*`.
    pub pattern: String,

    /// Handler name returned when the pattern matches.
    pub handler: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: RouteTableConfig = toml::from_str("").unwrap();
        assert!(config.routes.is_empty());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_parse_routes() {
        let config: RouteTableConfig = toml::from_str(
            r#"
            [observability]
            log_level = "debug"

            [[routes]]
            pattern = "/users/:id"
            handler = "user"

            [[routes]]
            pattern = "/*"
            handler = "fallback"
            "#,
        )
        .unwrap();

        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(
            config.routes,
            vec![
                RouteConfig {
                    pattern: "/users/:id".into(),
                    handler: "user".into(),
                },
                RouteConfig {
                    pattern: "/*".into(),
                    handler: "fallback".into(),
                },
            ]
        );
    }
}
