//! Application module
//!
//! Everything the `larder` binary needs around the engine:
//! - Command line settings
//! - Logging setup
//! - Loading configuration and the dataset into an engine
//! - Mapping fatal errors to exit codes

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
pub use runtime::{initialize_app, open_engine};
