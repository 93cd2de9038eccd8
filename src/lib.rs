//! # larder
//!
//! Concurrent aggregation engine that materializes nested read models for
//! recipes and meal planners out of flat per-table repositories.
//!
//! ## Usage
//!
//! ```bash
//! larder --dataset kitchen.yaml recipe --user <USER_ID>
//! larder --dataset kitchen.yaml calculate --planner <PLANNER_ID> --user <USER_ID>
//! ```
//!
//! ## Modules
//!
//! - `domain` - Entity rows, aggregates and the entity-kind topology
//! - `repository` - Repository trait, criteria and the in-memory store
//! - `engine` - Resolver graph, completion tracking and build entry points
//! - `planner` - Ingredient totals across a planner
//! - `config` - Engine configuration loading
//! - `error` - Branch failures and call-level errors
//! - `app` - Logging and runtime setup for the binary
//! - `cli` - Command line arguments and subcommand dispatch
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod planner;
pub mod repository;

pub use config::EngineConfig;
pub use engine::{AggregateQuery, Built, Engine};
pub use error::{BranchFailure, EngineError, FailureCause};
