//! Error handling utilities
//!
//! This module provides centralized error handling for the binary.

use tracing::error;

use crate::error::EngineError;

/// Handle fatal errors and exit with appropriate status code
///
/// Engine errors carry their own exit code; in verbose mode every branch
/// failure of an incomplete build is listed. Anything else exits with 1.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    let exit_code = if let Some(engine_err) = error.downcast_ref::<EngineError>() {
        eprintln!("Error: {engine_err}");

        if verbose >= 1 && !engine_err.failures().is_empty() {
            eprintln!("\nBranch failures:");
            for failure in engine_err.failures() {
                eprintln!("  depth {}: {}", failure.depth, failure);
            }
        }

        engine_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    };

    std::process::exit(exit_code)
}
