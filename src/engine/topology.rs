//! Starting the resolver graph of one call

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug_span, Instrument};

use super::node::Node;
use super::resolver::Resolver;
use super::router::Router;
use super::scope::CallContext;
use crate::domain::*;

/// Kinds reachable from `root`, every child before its parents
pub(crate) fn start_order(root: EntityKind) -> Vec<EntityKind> {
    fn visit(kind: EntityKind, order: &mut Vec<EntityKind>) {
        if order.contains(&kind) {
            return;
        }
        for child in kind.fan_out() {
            visit(*child, order);
        }
        order.push(kind);
    }

    let mut order = Vec::new();
    visit(root, &mut order);
    order
}

/// Spawn one resolver per kind reachable from `root`
///
/// Children start first so every resolver is handed the mailboxes of its
/// declared children at spawn time. The returned router holds every
/// mailbox; dropping it is what lets the graph wind down.
pub(crate) fn start(call: &Arc<CallContext>, root: EntityKind) -> (Router, JoinSet<()>) {
    let mut graph = Graph {
        call,
        capacity: call.engine.config().channel_capacity,
        router: Router::default(),
        tasks: JoinSet::new(),
    };

    for kind in start_order(root) {
        match kind {
            EntityKind::Recipe => graph.open::<RecipeAggregate>(),
            EntityKind::Category => graph.open::<CategoryAggregate>(),
            EntityKind::Ingredient => graph.open::<IngredientAggregate>(),
            EntityKind::Unit => graph.open::<UnitAggregate>(),
            EntityKind::Picture => graph.open::<PictureAggregate>(),
            EntityKind::AltName => graph.open::<AltNameAggregate>(),
            EntityKind::RecipeCategory => graph.open::<RecipeCategoryAggregate>(),
            EntityKind::RecipeIngredient => graph.open::<RecipeIngredientAggregate>(),
            EntityKind::RecipeProcess => graph.open::<RecipeProcessAggregate>(),
            EntityKind::RecipeMeasure => graph.open::<RecipeMeasureAggregate>(),
            EntityKind::Planner => graph.open::<PlannerAggregate>(),
            EntityKind::PlannerInterval => graph.open::<PlannerIntervalAggregate>(),
            EntityKind::PlannerRecipe => graph.open::<PlannerRecipeAggregate>(),
        }
    }

    (graph.router, graph.tasks)
}

struct Graph<'a> {
    call: &'a Arc<CallContext>,
    capacity: usize,
    router: Router,
    tasks: JoinSet<()>,
}

impl Graph<'_> {
    fn open<N: Node>(&mut self) {
        let (tx, rx) = mpsc::channel(self.capacity);
        let children = self.router.restricted_to(N::KIND.fan_out());
        N::install(&mut self.router, tx);

        let resolver = Resolver::<N>::new(Arc::clone(self.call), children);
        let span = debug_span!("resolver", kind = %N::KIND, depth = self.call.depth);
        self.tasks.spawn(resolver.run(rx).instrument(span));
    }
}
