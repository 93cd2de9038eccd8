//! Command line front end
//!
//! Every aggregate subcommand prints a JSON report with the aggregates and
//! the branch failures of the call; `--strict` turns a partial build into
//! an error instead.

pub mod args;

pub use args::{BuildArgs, Cli, Commands};

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::engine::{AggregateQuery, Built, Engine};

#[derive(Serialize)]
struct Report<'a, A> {
    aggregates: &'a [A],
    failures: Vec<String>,
}

/// Run one parsed subcommand against an opened engine
pub async fn run(engine: &Engine, command: Commands) -> Result<()> {
    let output = match command {
        Commands::Recipe(args) => {
            let built = engine.build_recipes_aggregate(query(&args)).await?;
            render(built, args.strict)?
        }
        Commands::Planner(args) => {
            let built = engine.build_planners_aggregate(query(&args)).await?;
            render(built, args.strict)?
        }
        Commands::Units(args) => {
            let built = engine.build_units_aggregate(query(&args)).await?;
            render(built, args.strict)?
        }
        Commands::Calculate { planner, user } => {
            let totals = engine.planner_calculate(planner, user).await?;
            serde_json::to_string_pretty(&totals)?
        }
        Commands::Config => toml::to_string_pretty(engine.config())?,
    };

    println!("{output}");
    Ok(())
}

fn query(args: &BuildArgs) -> AggregateQuery {
    let mut query = AggregateQuery::new();
    if let Some(id) = args.id {
        query = query.with_id(id);
    }
    if let Some(user) = args.user {
        query = query.with_user_id(user);
    }
    query
}

fn render<A: Serialize>(built: Built<A>, strict: bool) -> Result<String> {
    debug!(
        aggregates = built.aggregates.len(),
        failures = built.failures.len(),
        "Rendering build report"
    );
    if strict {
        let aggregates = built.into_result()?;
        return Ok(serde_json::to_string_pretty(&aggregates)?);
    }

    let report = Report {
        aggregates: &built.aggregates,
        failures: built.failures.iter().map(ToString::to_string).collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
