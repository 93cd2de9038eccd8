//! Flat entity rows as stored by the repositories

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::Id;
use super::kind::EntityKind;

/// Common surface of every stored row
///
/// The optional accessors expose the columns criteria predicates can
/// filter on. A row without the column never matches a predicate on it.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> Id;

    fn user_id(&self) -> Id;

    /// Parent row this one belongs to
    fn entity_id(&self) -> Option<Id> {
        None
    }

    /// Root of the linked family (category, ingredient)
    fn derive_id(&self) -> Option<Id> {
        None
    }

    fn unit_id(&self) -> Option<Id> {
        None
    }

    fn recipe_id(&self) -> Option<Id> {
        None
    }

    fn name(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Id,
    pub user_id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub user_id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Id,
    pub user_id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: Id,
    pub user_id: Id,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub id: Id,
    pub user_id: Id,
    pub entity_id: Id,
    pub uri: String,
    #[serde(default)]
    pub position: u32,
}

/// Alternate, usually localized, name attached to any other row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltName {
    pub id: Id,
    pub user_id: Id,
    pub entity_id: Id,
    pub name: String,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Links a recipe to a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCategory {
    pub id: Id,
    pub user_id: Id,
    pub entity_id: Id,
    pub derive_id: Id,
}

/// Links a recipe to an ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: Id,
    pub user_id: Id,
    pub entity_id: Id,
    pub derive_id: Id,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeProcess {
    pub id: Id,
    pub user_id: Id,
    pub entity_id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: u32,
}

/// Quantity of a recipe ingredient in one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMeasure {
    pub id: Id,
    pub user_id: Id,
    pub entity_id: Id,
    pub unit_id: Id,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planner {
    pub id: Id,
    pub user_id: Id,
    pub name: String,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerInterval {
    pub id: Id,
    pub user_id: Id,
    pub entity_id: Id,
    pub name: String,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
}

/// A recipe scheduled into a planner interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerRecipe {
    pub id: Id,
    pub user_id: Id,
    pub entity_id: Id,
    pub recipe_id: Id,
    #[serde(default)]
    pub servings: Option<u32>,
}

impl Entity for Recipe {
    const KIND: EntityKind = EntityKind::Recipe;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Entity for Ingredient {
    const KIND: EntityKind = EntityKind::Ingredient;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Entity for Unit {
    const KIND: EntityKind = EntityKind::Unit;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Entity for Picture {
    const KIND: EntityKind = EntityKind::Picture;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn entity_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }
}

impl Entity for AltName {
    const KIND: EntityKind = EntityKind::AltName;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn entity_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Entity for RecipeCategory {
    const KIND: EntityKind = EntityKind::RecipeCategory;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn entity_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }

    fn derive_id(&self) -> Option<Id> {
        Some(self.derive_id)
    }

    fn recipe_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }
}

impl Entity for RecipeIngredient {
    const KIND: EntityKind = EntityKind::RecipeIngredient;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn entity_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }

    fn derive_id(&self) -> Option<Id> {
        Some(self.derive_id)
    }

    fn recipe_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }
}

impl Entity for RecipeProcess {
    const KIND: EntityKind = EntityKind::RecipeProcess;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn entity_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }

    fn recipe_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Entity for RecipeMeasure {
    const KIND: EntityKind = EntityKind::RecipeMeasure;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn entity_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }

    fn unit_id(&self) -> Option<Id> {
        Some(self.unit_id)
    }
}

impl Entity for Planner {
    const KIND: EntityKind = EntityKind::Planner;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Entity for PlannerInterval {
    const KIND: EntityKind = EntityKind::PlannerInterval;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn entity_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Entity for PlannerRecipe {
    const KIND: EntityKind = EntityKind::PlannerRecipe;

    fn id(&self) -> Id {
        self.id
    }

    fn user_id(&self) -> Id {
        self.user_id
    }

    fn entity_id(&self) -> Option<Id> {
        Some(self.entity_id)
    }

    fn recipe_id(&self) -> Option<Id> {
        Some(self.recipe_id)
    }
}
