//! Application configuration
//!
//! Settings taken from the command line, as opposed to the engine tuning
//! knobs in [`crate::config::EngineConfig`].

use std::path::PathBuf;

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Explicit engine config file, if any
    pub config_path: Option<PathBuf>,
    /// Dataset fixture the repositories are seeded from
    pub dataset: Option<PathBuf>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_dataset(mut self, path: Option<PathBuf>) -> Self {
        self.dataset = path;
        self
    }

    /// Get the log filter based on verbosity
    ///
    /// `RUST_LOG`-style directives: the crate's own modules get more detail
    /// than its dependencies.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn,larder=info",
            1 => "info,larder=debug",
            2 => "debug,larder=trace",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_follows_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "warn,larder=info");
        assert_eq!(AppConfig::new(1).log_level(), "info,larder=debug");
        assert_eq!(AppConfig::new(7).log_level(), "trace");
    }

    #[test]
    fn test_builders_set_paths() {
        let config = AppConfig::new(0)
            .with_config_path(Some(PathBuf::from("larder.toml")))
            .with_dataset(Some(PathBuf::from("kitchen.yaml")));
        assert_eq!(config.config_path, Some(PathBuf::from("larder.toml")));
        assert_eq!(config.dataset, Some(PathBuf::from("kitchen.yaml")));
    }
}
