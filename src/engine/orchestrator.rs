//! Orchestration of one aggregate build call
//!
//! A call opens its own scope: a completion counter, a failure channel, a
//! cancellation token and one resolver task per reachable kind. The root
//! request is charged and sent, the orchestrator waits for the counter to
//! drain, then drops the router so the graph winds down from the root and
//! joins every resolver before returning.

use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::node::Node;
use super::request::{AggregateQuery, Envelope, Slot};
use super::scope::{CallContext, RecipeCache};
use super::topology;
use crate::config::EngineConfig;
use crate::domain::*;
use crate::error::{BranchFailure, EngineError};
use crate::repository::Repositories;

/// Aggregates of one call together with every branch failure it recorded
#[derive(Debug, Clone)]
pub struct Built<A> {
    pub aggregates: Vec<A>,
    /// In arrival order
    pub failures: Vec<BranchFailure>,
}

impl<A> Built<A> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn first_failure(&self) -> Option<&BranchFailure> {
        self.failures.first()
    }

    /// The aggregates, or [`EngineError::Incomplete`] if any branch failed
    pub fn into_result(self) -> Result<Vec<A>, EngineError> {
        if self.failures.is_empty() {
            Ok(self.aggregates)
        } else {
            Err(EngineError::Incomplete {
                failures: self.failures,
            })
        }
    }

    pub fn into_parts(self) -> (Vec<A>, Vec<BranchFailure>) {
        (self.aggregates, self.failures)
    }
}

struct EngineInner {
    repositories: Repositories,
    config: EngineConfig,
}

/// Entry point for building aggregates
///
/// Cheap to clone. Calls made through one engine share nothing but the
/// repositories and the configuration.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
    token: CancellationToken,
}

enum Outcome {
    Drained,
    Cancelled,
    Crashed(String),
}

impl Engine {
    pub fn new(repositories: Repositories, config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                repositories,
                config,
            }),
            token: CancellationToken::new(),
        }
    }

    pub fn repositories(&self) -> &Repositories {
        &self.inner.repositories
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Handle whose calls are all cancelled together with `token`
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            token,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn build_recipes_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<RecipeAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_recipe_categories_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<RecipeCategoryAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_recipe_ingredients_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<RecipeIngredientAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_recipe_processes_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<RecipeProcessAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_pictures_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<PictureAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_recipe_measures_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<RecipeMeasureAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_units_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<UnitAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_categories_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<CategoryAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_ingredients_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<IngredientAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_alt_names_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<AltNameAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_planners_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<PlannerAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_planner_intervals_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<PlannerIntervalAggregate>, EngineError> {
        self.build(query).await
    }

    pub async fn build_planner_recipes_aggregate(
        &self,
        query: AggregateQuery,
    ) -> Result<Built<PlannerRecipeAggregate>, EngineError> {
        self.build(query).await
    }

    async fn build<N: Node>(&self, query: AggregateQuery) -> Result<Built<N>, EngineError> {
        let recipes = Arc::new(RecipeCache::default());
        self.run::<N>(query, 0, self.token.child_token(), recipes).await
    }

    /// Pipeline started from inside a running call
    pub(crate) fn run_nested<N: Node>(
        &self,
        query: AggregateQuery,
        depth: usize,
        token: CancellationToken,
        recipes: Arc<RecipeCache>,
    ) -> BoxFuture<'static, Result<Built<N>, EngineError>> {
        let engine = self.clone();
        async move { engine.run::<N>(query, depth, token, recipes).await }.boxed()
    }

    async fn run<N: Node>(
        &self,
        query: AggregateQuery,
        depth: usize,
        token: CancellationToken,
        recipes: Arc<RecipeCache>,
    ) -> Result<Built<N>, EngineError> {
        let (failures_tx, mut failures_rx) = mpsc::unbounded_channel();
        let call = Arc::new(CallContext::new(
            self.clone(),
            token.clone(),
            depth,
            recipes,
            failures_tx,
        ));

        let key = query.key();
        let (router, mut tasks) = topology::start(&call, N::KIND);
        debug!(
            kind = %N::KIND,
            request = %key,
            depth,
            resolvers = ?router.installed(),
            "Starting aggregate build"
        );

        let (slot, pending) = Slot::append();
        call.completion.add(1);
        match N::mailbox(&router) {
            Some(root) => {
                tokio::select! {
                    sent = root.send(Envelope { query, slot }) => {
                        if sent.is_err() {
                            call.completion.done();
                        }
                    }
                    _ = token.cancelled() => call.completion.done(),
                }
            }
            None => {
                drop(slot);
                call.completion.done();
            }
        }

        let outcome = loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break Outcome::Cancelled,
                _ = call.completion.wait() => break Outcome::Drained,
                Some(joined) = tasks.join_next() => {
                    if let Err(err) = joined {
                        break Outcome::Crashed(err.to_string());
                    }
                }
            }
        };

        // Closing the root channel winds the graph down from the top
        drop(router);
        let aggregates = match outcome {
            Outcome::Drained => pending.resolve().await,
            _ => Vec::new(),
        };

        self.join_resolvers::<N>(&mut tasks).await;
        drop(call);

        let mut failures = Vec::new();
        while let Ok(failure) = failures_rx.try_recv() {
            failures.push(failure);
        }

        match outcome {
            Outcome::Drained => {
                if depth == 0 {
                    info!(
                        kind = %N::KIND,
                        request = %key,
                        aggregates = aggregates.len(),
                        failures = failures.len(),
                        "Aggregate build finished"
                    );
                }
                Ok(Built {
                    aggregates,
                    failures,
                })
            }
            Outcome::Cancelled => {
                warn!(kind = %N::KIND, request = %key, depth, "Aggregate build cancelled");
                Err(EngineError::Cancelled { failures })
            }
            Outcome::Crashed(reason) => Err(EngineError::Resolver(reason)),
        }
    }

    async fn join_resolvers<N: Node>(&self, tasks: &mut JoinSet<()>) {
        let timeout = self.config().teardown_timeout;
        let joined = tokio::time::timeout(timeout, async {
            while let Some(result) = tasks.join_next().await {
                if let Err(err) = result {
                    warn!(kind = %N::KIND, "Resolver task ended abnormally: {}", err);
                }
            }
        })
        .await;

        if joined.is_err() {
            warn!(
                kind = %N::KIND,
                remaining = tasks.len(),
                "Resolvers still running after {:?}, aborting",
                timeout
            );
            tasks.abort_all();
            while tasks.join_next().await.is_some() {}
        }
    }
}
