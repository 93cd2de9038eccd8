//! CLI argument structures

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Id;

/// Build recipe and meal-planner aggregates from a dataset fixture
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "larder - Materialize nested recipe and planner read models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the engine configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset fixture (JSON or YAML) seeding the repositories
    #[arg(short = 'd', long, global = true)]
    pub dataset: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build recipe aggregates
    Recipe(BuildArgs),

    /// Build planner aggregates, nested recipes included
    Planner(BuildArgs),

    /// Sum the ingredient quantities of one planner
    Calculate {
        /// Planner to calculate
        #[arg(long)]
        planner: Id,

        /// Owner of the planner
        #[arg(long)]
        user: Id,
    },

    /// Build unit aggregates
    Units(BuildArgs),

    /// Print the effective engine configuration
    Config,
}

/// Filters shared by the aggregate subcommands
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Only the row with this id
    #[arg(long)]
    pub id: Option<Id>,

    /// Only rows owned by this user
    #[arg(long)]
    pub user: Option<Id>,

    /// Fail with a non-zero exit code if any branch failed
    #[arg(long)]
    pub strict: bool,
}
