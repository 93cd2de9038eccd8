//! Request composites travelling between resolvers

use tokio::sync::oneshot;

use crate::domain::Id;
use crate::error::RequestKey;
use crate::repository::Criteria;

use super::compose::compose;

/// What to fetch: optional id, owner and parent filters plus extra criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateQuery {
    pub id: Option<Id>,
    pub user_id: Option<Id>,
    pub entity_id: Option<Id>,
    pub criteria: Criteria,
}

impl AggregateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: Id) -> Self {
        Self::new().with_id(id)
    }

    pub fn owned_by(user_id: Id) -> Self {
        Self::new().with_user_id(user_id)
    }

    pub fn with_id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_user_id(mut self, user_id: Id) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_entity_id(mut self, entity_id: Id) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Rows owned by `user_id` hanging off `parent_id`
    pub(crate) fn children_of(parent_id: Id, user_id: Id) -> Self {
        Self::owned_by(user_id).with_entity_id(parent_id)
    }

    /// The single row `id` owned by `user_id`
    pub(crate) fn row(id: Id, user_id: Id) -> Self {
        Self::by_id(id).with_user_id(user_id)
    }

    pub fn key(&self) -> RequestKey {
        RequestKey {
            id: self.id,
            user_id: self.user_id,
            entity_id: self.entity_id,
        }
    }

    /// Final criteria for a repository whose builder is `builder`
    pub fn compose(&self, builder: Criteria) -> Criteria {
        compose(self.id, self.user_id, self.entity_id, &self.criteria, builder)
    }
}

/// One request plus the slot its result goes to; consumed exactly once
pub(crate) struct Envelope<A> {
    pub query: AggregateQuery,
    pub slot: Slot<A>,
}

/// Destination of a resolver's result
pub(crate) enum Slot<A> {
    /// Collection field: every resolved row
    Append(oneshot::Sender<Vec<A>>),
    /// Single field: the first resolved row
    Single(oneshot::Sender<Option<A>>),
}

impl<A> Slot<A> {
    pub fn append() -> (Self, Pending<Vec<A>>) {
        let (tx, rx) = oneshot::channel();
        (Self::Append(tx), Pending::new(rx))
    }

    pub fn single() -> (Self, Pending<Option<A>>) {
        let (tx, rx) = oneshot::channel();
        (Self::Single(tx), Pending::new(rx))
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    pub fn deliver(self, items: Vec<A>) {
        // The receiver is gone only when the call was torn down early
        match self {
            Self::Append(tx) => {
                let _ = tx.send(items);
            }
            Self::Single(tx) => {
                let _ = tx.send(items.into_iter().next());
            }
        }
    }
}

/// Result of a fan-out that has not been delivered yet
pub(crate) struct Pending<T> {
    rx: oneshot::Receiver<T>,
}

impl<T: Default> Pending<T> {
    fn new(rx: oneshot::Receiver<T>) -> Self {
        Self { rx }
    }

    /// Wait for delivery; a slot dropped without delivery reads as empty
    pub async fn resolve(self) -> T {
        self.rx.await.unwrap_or_default()
    }
}
