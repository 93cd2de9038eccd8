//! Per-row fan-out to child resolvers
//!
//! A [`FanOut`] is created for every fetched row. Creating it charges the
//! completion counter once per child kind the parent declares in
//! [`EntityKind::fan_out`]; each dispatch spends one charge and dropping
//! the fan-out discharges whatever was never requested, so the counter
//! cannot drift from the declaration.

use std::sync::Arc;
use tracing::error;

use super::node::Node;
use super::request::{AggregateQuery, Envelope, Pending, Slot};
use super::router::Router;
use super::scope::CallContext;
use crate::domain::{EntityKind, Id, RecipeAggregate};
use crate::error::FailureCause;

pub(crate) struct FanOut {
    call: Arc<CallContext>,
    children: Arc<Router>,
    parent: EntityKind,
    remaining: Vec<EntityKind>,
}

impl FanOut {
    pub fn for_row(call: Arc<CallContext>, children: Arc<Router>, parent: EntityKind) -> Self {
        let declared = parent.fan_out();
        call.completion.add(declared.len());
        Self {
            call,
            children,
            parent,
            remaining: declared.to_vec(),
        }
    }

    /// Request every matching `C` row for a collection field
    pub async fn many<C: Node>(&mut self, query: AggregateQuery) -> Pending<Vec<C>> {
        let (slot, pending) = Slot::append();
        self.dispatch::<C>(query, slot).await;
        pending
    }

    /// Request the first matching `C` row for a single field
    pub async fn one<C: Node>(&mut self, query: AggregateQuery) -> Pending<Option<C>> {
        let (slot, pending) = Slot::single();
        self.dispatch::<C>(query, slot).await;
        pending
    }

    /// Resolve a whole recipe graph in a nested pipeline
    pub async fn nested_recipe(&self, recipe_id: Id, user_id: Id) -> Option<RecipeAggregate> {
        self.call.nested_recipe(recipe_id, user_id).await
    }

    // A slot that is dropped here resolves as empty on the parent side
    async fn dispatch<C: Node>(&mut self, query: AggregateQuery, slot: Slot<C>) {
        let key = query.key();

        // Each declared child may be requested once per row
        let Some(position) = self.remaining.iter().position(|kind| *kind == C::KIND) else {
            error!(
                parent = %self.parent,
                child = %C::KIND,
                "Fan-out to a child that is not declared or already requested"
            );
            self.call.fail(C::KIND, key, FailureCause::Undeclared(C::KIND));
            return;
        };
        self.remaining.swap_remove(position);

        let Some(mailbox) = C::mailbox(&self.children) else {
            self.call.fail(C::KIND, key, FailureCause::NotStarted(C::KIND));
            self.call.completion.done();
            return;
        };

        let envelope = Envelope { query, slot };
        tokio::select! {
            sent = mailbox.send(envelope) => {
                if sent.is_err() {
                    self.call.fail(C::KIND, key, FailureCause::Closed(C::KIND));
                    self.call.completion.done();
                }
            }
            _ = self.call.token.cancelled() => {
                self.call.completion.done();
            }
        }
    }
}

impl Drop for FanOut {
    fn drop(&mut self) {
        for _ in self.remaining.drain(..) {
            self.call.completion.done();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::domain::{AltNameAggregate, Picture, UnitAggregate};
    use crate::engine::scope::RecipeCache;
    use crate::engine::Engine;
    use crate::repository::Repositories;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    fn call() -> (Arc<CallContext>, mpsc::UnboundedReceiver<crate::error::BranchFailure>) {
        let engine = Engine::new(Repositories::in_memory(), EngineConfig::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let call = CallContext::new(
            engine,
            CancellationToken::new(),
            0,
            Arc::new(RecipeCache::default()),
            tx,
        );
        (Arc::new(call), rx)
    }

    fn picture_row() -> Picture {
        Picture {
            id: Id::new(),
            user_id: Id::new(),
            entity_id: Id::new(),
            uri: "file:///a.png".into(),
            position: 0,
        }
    }

    #[tokio::test]
    async fn test_unrequested_children_are_discharged_on_drop() {
        let (call, _failures) = call();
        let fan = FanOut::for_row(Arc::clone(&call), Arc::default(), EntityKind::RecipeIngredient);
        assert_eq!(call.completion.outstanding(), 4);
        drop(fan);
        assert_eq!(call.completion.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_missing_resolver_fails_instead_of_blocking() {
        let (call, mut failures) = call();
        let mut fan = FanOut::for_row(Arc::clone(&call), Arc::default(), EntityKind::Picture);

        let row = picture_row();
        let pending = fan
            .many::<AltNameAggregate>(AggregateQuery::children_of(row.id, row.user_id))
            .await;
        assert!(pending.resolve().await.is_empty());

        let failure = failures.try_recv().unwrap();
        assert!(matches!(
            failure.cause,
            FailureCause::NotStarted(EntityKind::AltName)
        ));
        assert_eq!(call.completion.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_undeclared_child_is_rejected_without_charge() {
        let (call, mut failures) = call();
        let mut fan = FanOut::for_row(Arc::clone(&call), Arc::default(), EntityKind::Picture);

        let pending = fan
            .one::<UnitAggregate>(AggregateQuery::by_id(Id::new()))
            .await;
        assert!(pending.resolve().await.is_none());
        assert!(matches!(
            failures.try_recv().unwrap().cause,
            FailureCause::Undeclared(EntityKind::Unit)
        ));

        // the declared alt-name charge is still outstanding until drop
        assert_eq!(call.completion.outstanding(), 1);
        drop(fan);
        assert_eq!(call.completion.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_delivers_envelope() {
        let (call, _failures) = call();
        let (tx, mut rx) = mpsc::channel(1);
        let router = Router {
            alt_name: Some(tx),
            ..Default::default()
        };
        let mut fan = FanOut::for_row(Arc::clone(&call), Arc::new(router), EntityKind::Picture);

        let row = picture_row();
        let pending = fan
            .many::<AltNameAggregate>(AggregateQuery::children_of(row.id, row.user_id))
            .await;

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.query.entity_id, Some(row.id));
        assert_eq!(envelope.query.user_id, Some(row.user_id));
        envelope.slot.deliver(Vec::new());
        assert!(pending.resolve().await.is_empty());

        // the charge stays with the receiving resolver
        drop(fan);
        assert_eq!(call.completion.outstanding(), 1);
    }
}
