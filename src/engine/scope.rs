//! State owned by one build call
//!
//! Every resolver of a call shares one [`CallContext`]: the completion
//! counter, the failure channel drained by the orchestrator and the
//! cancellation token. Nothing here outlives the call.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex, OnceCell};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::completion::Completion;
use super::orchestrator::Engine;
use super::request::AggregateQuery;
use crate::domain::{EntityKind, Id, RecipeAggregate};
use crate::error::{BranchFailure, FailureCause, RequestKey};

type RecipeCell = Arc<OnceCell<Option<RecipeAggregate>>>;

/// Nested recipe results of one top-level call, keyed by (recipe, owner)
///
/// Shared by every nested pipeline of the call so each referenced recipe
/// is resolved once.
#[derive(Default)]
pub(crate) struct RecipeCache {
    entries: Mutex<HashMap<(Id, Id), RecipeCell>>,
}

impl RecipeCache {
    async fn cell(&self, recipe_id: Id, user_id: Id) -> RecipeCell {
        let mut entries = self.entries.lock().await;
        Arc::clone(entries.entry((recipe_id, user_id)).or_default())
    }
}

pub(crate) struct CallContext {
    pub engine: Engine,
    pub completion: Completion,
    pub token: CancellationToken,
    /// 0 for a top-level call, +1 per nested planner-recipe pipeline
    pub depth: usize,
    pub recipes: Arc<RecipeCache>,
    failures: mpsc::UnboundedSender<BranchFailure>,
}

impl CallContext {
    pub fn new(
        engine: Engine,
        token: CancellationToken,
        depth: usize,
        recipes: Arc<RecipeCache>,
        failures: mpsc::UnboundedSender<BranchFailure>,
    ) -> Self {
        Self {
            engine,
            completion: Completion::default(),
            token,
            depth,
            recipes,
            failures,
        }
    }

    /// Record a branch failure for this call
    pub fn fail(&self, kind: EntityKind, request: RequestKey, cause: FailureCause) {
        self.report(BranchFailure {
            kind,
            request,
            depth: self.depth,
            cause,
        });
    }

    /// Record a failure, typically one raised inside a nested pipeline
    ///
    /// Empty results never cancel the call, even with `cancel_on_failure`
    /// set; they are recorded and the build carries on.
    pub fn report(&self, failure: BranchFailure) {
        let empty = failure.is_empty_result();
        if empty {
            debug!("Branch failure: {}", failure);
        } else {
            warn!("Branch failure: {}", failure);
        }

        // The receiver lives as long as the orchestrator of this call
        let _ = self.failures.send(failure);

        if !empty && self.engine.config().cancel_on_failure {
            self.token.cancel();
        }
    }

    /// Resolve a recipe through its own nested pipeline, once per call
    pub async fn nested_recipe(&self, recipe_id: Id, user_id: Id) -> Option<RecipeAggregate> {
        let depth = self.depth + 1;
        let limit = self.engine.config().max_nesting_depth;
        let query = AggregateQuery::row(recipe_id, user_id);

        if depth > limit {
            self.fail(
                EntityKind::Recipe,
                query.key(),
                FailureCause::DepthExceeded { depth, limit },
            );
            return None;
        }

        let cell = self.recipes.cell(recipe_id, user_id).await;
        let recipe = cell
            .get_or_init(|| async {
                debug!(%recipe_id, depth, "Resolving nested recipe pipeline");
                let run = self.engine.run_nested::<RecipeAggregate>(
                    query,
                    depth,
                    self.token.child_token(),
                    Arc::clone(&self.recipes),
                );
                match run.await {
                    Ok(built) => {
                        for failure in built.failures {
                            self.report(failure);
                        }
                        built.aggregates.into_iter().next()
                    }
                    Err(err) => {
                        for failure in err.failures() {
                            self.report(failure.clone());
                        }
                        warn!(%recipe_id, "Nested recipe pipeline failed: {}", err);
                        None
                    }
                }
            })
            .await;

        recipe.clone()
    }
}
