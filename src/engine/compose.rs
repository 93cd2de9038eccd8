//! Criteria composition for resolver requests

use crate::domain::Id;
use crate::repository::Criteria;

/// Merge request filters onto a repository's criteria builder
///
/// The caller's `base` predicates come first, then `by_id` (when `id` is
/// set), `by_user_id` (always; `None` adds nothing) and `by_entity_id`
/// (when `entity_id` is set), in that order.
pub fn compose(
    id: Option<Id>,
    user_id: Option<Id>,
    entity_id: Option<Id>,
    base: &Criteria,
    builder: Criteria,
) -> Criteria {
    let mut criteria = builder.merge(base);
    if let Some(id) = id {
        criteria = criteria.by_id(id);
    }
    criteria = criteria.by_user_id(user_id);
    if let Some(entity_id) = entity_id {
        criteria = criteria.by_entity_id(entity_id);
    }
    criteria
}
