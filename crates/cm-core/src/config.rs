//! Engine configuration
//!
//! Settings for the progress/analytics core. Everything has a sensible
//! default; deployments override through environment variables.

use serde::{Deserialize, Serialize};

/// Configuration for the progress and analytics engines
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Analytics settings
    pub analytics: AnalyticsConfig,

    /// Cache-hint settings
    pub cache: CacheHintConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// Period applied when a request carries no (or an unrecognized)
    /// period string
    pub default_period: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheHintConfig {
    /// Whether the engine forwards invalidation hints to the wired
    /// cache invalidator after writes
    pub enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            analytics: AnalyticsConfig {
                default_period: "last-6-months".to_string(),
            },
            cache: CacheHintConfig { enabled: true },
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(period) = std::env::var("CM_ANALYTICS_DEFAULT_PERIOD") {
            config.analytics.default_period = period;
        }
        if let Ok(v) = std::env::var("CM_CACHE_HINTS_ENABLED") {
            config.cache.enabled = v == "true" || v == "1";
        }

        config
    }
}
