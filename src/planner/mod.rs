//! Shopping totals for a planner
//!
//! The calculation runs on top of a regular planner build: the planner is
//! aggregated (nested recipes included) and then reduced by [`calculate`].

mod calculate;

pub use calculate::calculate;

use tracing::{debug, info};

use crate::domain::{Id, PlannerCalculation};
use crate::engine::{AggregateQuery, Engine};
use crate::error::EngineError;

impl Engine {
    /// Sum the ingredient quantities of every recipe scheduled in a planner
    ///
    /// Branches that simply matched no rows (an interval without recipes, a
    /// recipe without pictures) do not fail the calculation. Any other
    /// branch failure does, since the totals would silently be short.
    pub async fn planner_calculate(
        &self,
        planner_id: Id,
        user_id: Id,
    ) -> Result<Vec<PlannerCalculation>, EngineError> {
        let query = AggregateQuery::by_id(planner_id).with_user_id(user_id);
        let (planners, failures) = self.build_planners_aggregate(query).await?.into_parts();

        let (empty, failures): (Vec<_>, Vec<_>) =
            failures.into_iter().partition(|f| f.is_empty_result());
        if !failures.is_empty() {
            return Err(EngineError::Incomplete { failures });
        }
        debug!(%planner_id, empty_branches = empty.len(), "Planner built");

        let Some(planner) = planners.first() else {
            return Err(EngineError::NotFound(format!(
                "planner {planner_id} for user {user_id}"
            )));
        };

        let totals = calculate(planner);
        info!(%planner_id, entries = totals.len(), "Planner calculation finished");
        Ok(totals)
    }
}
