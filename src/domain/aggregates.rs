//! Composed read models built by the engine
//!
//! Every aggregate owns its entity row plus the child collections resolved
//! for it. Child collections only ever contain rows owned by the same user
//! and attached to the parent row.

use serde::Serialize;

use super::entities::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitAggregate {
    pub entity: Unit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientAggregate {
    pub entity: Ingredient,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AltNameAggregate {
    pub entity: AltName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictureAggregate {
    pub entity: Picture,
    pub alt_names: Vec<AltNameAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregate {
    pub entity: Category,
    pub pictures: Vec<PictureAggregate>,
    pub alt_names: Vec<AltNameAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeMeasureAggregate {
    pub entity: RecipeMeasure,
    pub unit: Option<UnitAggregate>,
    pub alt_names: Vec<AltNameAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredientAggregate {
    pub entity: RecipeIngredient,
    pub measures: Vec<RecipeMeasureAggregate>,
    pub ingredient: Option<IngredientAggregate>,
    pub pictures: Vec<PictureAggregate>,
    pub alt_names: Vec<AltNameAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeProcessAggregate {
    pub entity: RecipeProcess,
    pub pictures: Vec<PictureAggregate>,
    pub alt_names: Vec<AltNameAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCategoryAggregate {
    pub entity: RecipeCategory,
    pub category: Option<CategoryAggregate>,
}

/// The full graph for one recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeAggregate {
    pub entity: Recipe,
    pub categories: Vec<RecipeCategoryAggregate>,
    pub ingredients: Vec<RecipeIngredientAggregate>,
    pub processes: Vec<RecipeProcessAggregate>,
    pub pictures: Vec<PictureAggregate>,
    pub alt_names: Vec<AltNameAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerRecipeAggregate {
    pub entity: PlannerRecipe,
    pub recipe: Option<RecipeAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerIntervalAggregate {
    pub entity: PlannerInterval,
    pub recipes: Vec<PlannerRecipeAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerAggregate {
    pub entity: Planner,
    pub intervals: Vec<PlannerIntervalAggregate>,
}

/// Summed quantity of one ingredient in one unit across a planner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerCalculation {
    pub ingredient: IngredientAggregate,
    pub unit: UnitAggregate,
    pub amount: f64,
}
