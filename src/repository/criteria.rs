//! Opaque filter criteria handed to repositories
//!
//! A [`Criteria`] is an ordered list of predicates. Builders append in call
//! order, so the sequence a composer applied them in stays observable.

use serde::{Deserialize, Serialize};

use crate::domain::{Entity, Id};

/// One predicate over a row column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum Filter {
    Id(Id),
    UserId(Id),
    EntityId(Id),
    Name(String),
    DeriveId(Id),
    UnitId(Id),
    RecipeId(Id),
}

impl Filter {
    /// Whether `row` satisfies this predicate
    pub fn matches<E: Entity>(&self, row: &E) -> bool {
        match self {
            Filter::Id(id) => row.id() == *id,
            Filter::UserId(id) => row.user_id() == *id,
            Filter::EntityId(id) => row.entity_id() == Some(*id),
            Filter::Name(name) => row.name() == Some(name.as_str()),
            Filter::DeriveId(id) => row.derive_id() == Some(*id),
            Filter::UnitId(id) => row.unit_id() == Some(*id),
            Filter::RecipeId(id) => row.recipe_id() == Some(*id),
        }
    }
}

/// Conjunction of filters plus an optional row limit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default)]
    filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(self, id: Id) -> Self {
        self.push(Filter::Id(id))
    }

    /// Restrict to one owner; `None` leaves the criteria untouched
    pub fn by_user_id(self, user_id: Option<Id>) -> Self {
        match user_id {
            Some(id) => self.push(Filter::UserId(id)),
            None => self,
        }
    }

    pub fn by_entity_id(self, entity_id: Id) -> Self {
        self.push(Filter::EntityId(entity_id))
    }

    pub fn by_name(self, name: impl Into<String>) -> Self {
        self.push(Filter::Name(name.into()))
    }

    pub fn by_derive_id(self, derive_id: Id) -> Self {
        self.push(Filter::DeriveId(derive_id))
    }

    pub fn by_unit_id(self, unit_id: Id) -> Self {
        self.push(Filter::UnitId(unit_id))
    }

    pub fn by_recipe_id(self, recipe_id: Id) -> Self {
        self.push(Filter::RecipeId(recipe_id))
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Append every predicate of `other`, keeping the tighter limit
    pub fn merge(mut self, other: &Criteria) -> Self {
        self.filters.extend(other.filters.iter().cloned());
        self.limit = match (self.limit, other.limit) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.limit.is_none()
    }

    pub fn matches<E: Entity>(&self, row: &E) -> bool {
        self.filters.iter().all(|filter| filter.matches(row))
    }

    fn push(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }
}
