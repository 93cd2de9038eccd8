//! Engine configuration
//!
//! Settings come from a TOML file, then `LARDER_*` environment variables
//! override individual fields, then the result is validated.

pub mod loader;

pub use loader::{default_config_path, ConfigLoader};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Tuning knobs for the aggregation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Buffer of every resolver request channel; 1 keeps sends close to a rendezvous
    pub channel_capacity: usize,

    /// How many planner-recipe pipelines may nest inside one another
    pub max_nesting_depth: usize,

    /// Cancel the whole call on its first branch failure other than an empty result
    pub cancel_on_failure: bool,

    /// Report a zero-row fetch as a branch failure
    pub empty_result_is_failure: bool,

    /// Upper bound on joining resolver tasks after the counter drained
    #[serde(with = "humantime_serde")]
    pub teardown_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1,
            max_nesting_depth: 4,
            cancel_on_failure: false,
            empty_result_is_failure: true,
            teardown_timeout: Duration::from_secs(5),
        }
    }
}

impl EngineConfig {
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_cancel_on_failure(mut self, enabled: bool) -> Self {
        self.cancel_on_failure = enabled;
        self
    }

    pub fn with_empty_result_is_failure(mut self, enabled: bool) -> Self {
        self.empty_result_is_failure = enabled;
        self
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `LARDER_*` overrides from the process environment
    pub fn merge_env_vars(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("LARDER_CHANNEL_CAPACITY") {
            self.channel_capacity = parse_number("LARDER_CHANNEL_CAPACITY", &value)?;
        }

        if let Some(value) = lookup("LARDER_MAX_NESTING_DEPTH") {
            self.max_nesting_depth = parse_number("LARDER_MAX_NESTING_DEPTH", &value)?;
        }

        if let Some(value) = lookup("LARDER_CANCEL_ON_FAILURE") {
            self.cancel_on_failure = parse_bool("LARDER_CANCEL_ON_FAILURE", &value)?;
        }

        if let Some(value) = lookup("LARDER_EMPTY_RESULT_IS_FAILURE") {
            self.empty_result_is_failure = parse_bool("LARDER_EMPTY_RESULT_IS_FAILURE", &value)?;
        }

        if let Some(value) = lookup("LARDER_TEARDOWN_TIMEOUT") {
            self.teardown_timeout = humantime_serde::re::humantime::parse_duration(&value)
                .map_err(|e| ConfigError::invalid("LARDER_TEARDOWN_TIMEOUT", e.to_string()))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::invalid(
                "channel_capacity",
                "must be at least 1",
            ));
        }
        if self.max_nesting_depth == 0 {
            return Err(ConfigError::invalid(
                "max_nesting_depth",
                "must be at least 1 for planner recipes to resolve",
            ));
        }
        if self.teardown_timeout.is_zero() {
            return Err(ConfigError::invalid("teardown_timeout", "must be positive"));
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("expected a number, got {value:?}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("expected true or false, got {value:?}")))
}
