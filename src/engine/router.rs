//! Typed senders to the resolvers of one call

use tokio::sync::mpsc;

use super::request::Envelope;
use crate::domain::*;

/// Request channel of one resolver
pub(crate) type Mailbox<A> = mpsc::Sender<Envelope<A>>;

/// Mailboxes of the running resolvers, one optional slot per kind
///
/// A resolver only ever holds the slots of its declared children, so
/// dropping the orchestrator's copy closes the root channel and teardown
/// cascades from the root down to the leaves.
#[derive(Clone, Default)]
pub(crate) struct Router {
    pub recipe: Option<Mailbox<RecipeAggregate>>,
    pub category: Option<Mailbox<CategoryAggregate>>,
    pub ingredient: Option<Mailbox<IngredientAggregate>>,
    pub unit: Option<Mailbox<UnitAggregate>>,
    pub picture: Option<Mailbox<PictureAggregate>>,
    pub alt_name: Option<Mailbox<AltNameAggregate>>,
    pub recipe_category: Option<Mailbox<RecipeCategoryAggregate>>,
    pub recipe_ingredient: Option<Mailbox<RecipeIngredientAggregate>>,
    pub recipe_process: Option<Mailbox<RecipeProcessAggregate>>,
    pub recipe_measure: Option<Mailbox<RecipeMeasureAggregate>>,
    pub planner: Option<Mailbox<PlannerAggregate>>,
    pub planner_interval: Option<Mailbox<PlannerIntervalAggregate>>,
    pub planner_recipe: Option<Mailbox<PlannerRecipeAggregate>>,
}

impl Router {
    /// Copy holding only the mailboxes of `kinds`
    pub fn restricted_to(&self, kinds: &[EntityKind]) -> Router {
        let mut out = Router::default();
        for kind in kinds {
            match kind {
                EntityKind::Recipe => out.recipe = self.recipe.clone(),
                EntityKind::Category => out.category = self.category.clone(),
                EntityKind::Ingredient => out.ingredient = self.ingredient.clone(),
                EntityKind::Unit => out.unit = self.unit.clone(),
                EntityKind::Picture => out.picture = self.picture.clone(),
                EntityKind::AltName => out.alt_name = self.alt_name.clone(),
                EntityKind::RecipeCategory => out.recipe_category = self.recipe_category.clone(),
                EntityKind::RecipeIngredient => {
                    out.recipe_ingredient = self.recipe_ingredient.clone()
                }
                EntityKind::RecipeProcess => out.recipe_process = self.recipe_process.clone(),
                EntityKind::RecipeMeasure => out.recipe_measure = self.recipe_measure.clone(),
                EntityKind::Planner => out.planner = self.planner.clone(),
                EntityKind::PlannerInterval => {
                    out.planner_interval = self.planner_interval.clone()
                }
                EntityKind::PlannerRecipe => out.planner_recipe = self.planner_recipe.clone(),
            }
        }
        out
    }

    /// Kinds that currently have a mailbox
    pub fn installed(&self) -> Vec<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect()
    }

    fn has(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Recipe => self.recipe.is_some(),
            EntityKind::Category => self.category.is_some(),
            EntityKind::Ingredient => self.ingredient.is_some(),
            EntityKind::Unit => self.unit.is_some(),
            EntityKind::Picture => self.picture.is_some(),
            EntityKind::AltName => self.alt_name.is_some(),
            EntityKind::RecipeCategory => self.recipe_category.is_some(),
            EntityKind::RecipeIngredient => self.recipe_ingredient.is_some(),
            EntityKind::RecipeProcess => self.recipe_process.is_some(),
            EntityKind::RecipeMeasure => self.recipe_measure.is_some(),
            EntityKind::Planner => self.planner.is_some(),
            EntityKind::PlannerInterval => self.planner_interval.is_some(),
            EntityKind::PlannerRecipe => self.planner_recipe.is_some(),
        }
    }
}
