//! Entity kinds and the fan-out topology between them
//!
//! The child list returned by [`EntityKind::fan_out`] is the single
//! declaration of which resolvers a kind talks to. The engine charges the
//! completion counter from it and starts exactly the resolvers reachable
//! from a root kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One flat entity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Recipe,
    Category,
    Ingredient,
    Unit,
    Picture,
    AltName,
    RecipeCategory,
    RecipeIngredient,
    RecipeProcess,
    RecipeMeasure,
    Planner,
    PlannerInterval,
    PlannerRecipe,
}

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Recipe,
        EntityKind::Category,
        EntityKind::Ingredient,
        EntityKind::Unit,
        EntityKind::Picture,
        EntityKind::AltName,
        EntityKind::RecipeCategory,
        EntityKind::RecipeIngredient,
        EntityKind::RecipeProcess,
        EntityKind::RecipeMeasure,
        EntityKind::Planner,
        EntityKind::PlannerInterval,
        EntityKind::PlannerRecipe,
    ];

    /// Child kinds a resolver of this kind sends requests to, once per row
    pub const fn fan_out(self) -> &'static [EntityKind] {
        use EntityKind::*;
        match self {
            Unit | Ingredient | AltName => &[],
            Picture => &[AltName],
            Category => &[Picture, AltName],
            RecipeMeasure => &[Unit, AltName],
            RecipeIngredient => &[RecipeMeasure, Ingredient, Picture, AltName],
            RecipeProcess => &[Picture, AltName],
            RecipeCategory => &[Category],
            Recipe => &[
                RecipeCategory,
                RecipeIngredient,
                RecipeProcess,
                Picture,
                AltName,
            ],
            // Planner recipes embed a nested recipe pipeline instead of a channel hop
            PlannerRecipe => &[],
            PlannerInterval => &[PlannerRecipe],
            Planner => &[PlannerInterval],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Recipe => "recipe",
            EntityKind::Category => "category",
            EntityKind::Ingredient => "ingredient",
            EntityKind::Unit => "unit",
            EntityKind::Picture => "picture",
            EntityKind::AltName => "alt_name",
            EntityKind::RecipeCategory => "recipe_category",
            EntityKind::RecipeIngredient => "recipe_ingredient",
            EntityKind::RecipeProcess => "recipe_process",
            EntityKind::RecipeMeasure => "recipe_measure",
            EntityKind::Planner => "planner",
            EntityKind::PlannerInterval => "planner_interval",
            EntityKind::PlannerRecipe => "planner_recipe",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
