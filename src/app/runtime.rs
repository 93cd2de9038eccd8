//! Runtime initialization and setup
//!
//! Turns the command line settings into a ready engine: logging first,
//! then the engine configuration, then the dataset that seeds the
//! repositories.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::app::{config::AppConfig, logging::init_logging};
use crate::config::ConfigLoader;
use crate::engine::Engine;
use crate::repository::{Dataset, Repositories};

/// Initialize logging and open the engine
pub async fn initialize_app(config: &AppConfig) -> Result<Engine> {
    init_logging(config);
    open_engine(config).await
}

/// Build an engine from the configured config file and dataset
///
/// Without a dataset the repositories start empty.
pub async fn open_engine(config: &AppConfig) -> Result<Engine> {
    let loader = ConfigLoader::new(config.config_path.clone());
    let engine_config = loader.load().await.map_err(crate::error::EngineError::from)?;
    debug!(?engine_config, "Engine configuration loaded");

    let repositories = match &config.dataset {
        Some(path) => {
            let dataset = Dataset::load(path)
                .await
                .with_context(|| format!("Failed to load dataset {}", path.display()))?;
            info!(rows = dataset.row_count(), "Dataset loaded from {}", path.display());
            dataset.into_repositories()
        }
        None => Repositories::in_memory(),
    };

    Ok(Engine::new(repositories, engine_config))
}
