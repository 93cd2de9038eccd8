//! Long-running resolver task for one entity kind
//!
//! A resolver drains its request channel and handles every envelope
//! concurrently: compose criteria, fetch, fan each row out to the child
//! resolvers, deliver the assembled aggregates and discharge the request.

use futures::future::join_all;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::fanout::FanOut;
use super::node::Node;
use super::request::Envelope;
use super::router::Router;
use super::scope::CallContext;
use crate::error::FailureCause;
use crate::repository::Repository;

pub(crate) struct Resolver<N: Node> {
    call: Arc<CallContext>,
    /// Mailboxes of this kind's declared children only
    children: Arc<Router>,
    repository: Arc<dyn Repository<N::Entity>>,
}

impl<N: Node> Resolver<N> {
    pub fn new(call: Arc<CallContext>, children: Router) -> Self {
        let repository = call.engine.repositories().of::<N::Entity>();
        Self {
            call,
            children: Arc::new(children),
            repository,
        }
    }

    /// Serve requests until the channel closes and in-flight work drains,
    /// or until the call is cancelled
    pub async fn run(self, mut inbox: mpsc::Receiver<Envelope<N>>) {
        let mut in_flight = FuturesUnordered::new();
        let mut served = 0usize;

        loop {
            tokio::select! {
                biased;
                _ = self.call.token.cancelled() => {
                    debug!(kind = %N::KIND, in_flight = in_flight.len(), "Resolver cancelled");
                    return;
                }
                Some(()) = in_flight.next(), if !in_flight.is_empty() => {}
                received = inbox.recv() => match received {
                    Some(envelope) => {
                        served += 1;
                        in_flight.push(self.handle(envelope));
                    }
                    None => break,
                }
            }
        }

        while !in_flight.is_empty() {
            tokio::select! {
                biased;
                _ = self.call.token.cancelled() => {
                    debug!(kind = %N::KIND, in_flight = in_flight.len(), "Resolver cancelled while draining");
                    return;
                }
                _ = in_flight.next() => {}
            }
        }

        trace!(kind = %N::KIND, served, depth = self.call.depth, "Resolver finished");
    }

    async fn handle(&self, envelope: Envelope<N>) {
        let Envelope { query, slot } = envelope;
        let key = query.key();
        let criteria = query.compose(self.repository.criteria());

        trace!(kind = %N::KIND, request = %key, "Fetching rows");
        let mut rows = match self.repository.find_all(criteria).await {
            Ok(rows) => {
                if rows.is_empty() && self.call.engine.config().empty_result_is_failure {
                    self.call.fail(N::KIND, key, FailureCause::Empty);
                }
                rows
            }
            Err(err) => {
                self.call.fail(N::KIND, key, FailureCause::Fetch(Arc::new(err)));
                Vec::new()
            }
        };

        if slot.is_single() {
            rows.truncate(1);
        }

        // Every row charges its children before this request is discharged
        let assembled = join_all(rows.into_iter().map(|row| {
            let fan = FanOut::for_row(Arc::clone(&self.call), Arc::clone(&self.children), N::KIND);
            N::assemble(row, fan)
        }))
        .await;

        trace!(kind = %N::KIND, request = %key, rows = assembled.len(), "Delivering aggregates");
        slot.deliver(assembled);
        self.call.completion.done();
    }
}
