//! How each aggregate is assembled from its row and its children
//!
//! One [`Node`] implementation per aggregate type. `assemble` requests the
//! children declared for the kind, then awaits them together so sibling
//! kinds resolve concurrently.

use async_trait::async_trait;

use super::fanout::FanOut;
use super::request::AggregateQuery;
use super::router::{Mailbox, Router};
use crate::domain::*;
use crate::repository::Stored;

#[async_trait]
pub(crate) trait Node: Sized + Send + Sync + 'static {
    type Entity: Stored;

    const KIND: EntityKind = <Self::Entity as Entity>::KIND;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>>;

    fn install(router: &mut Router, mailbox: Mailbox<Self>);

    async fn assemble(row: Self::Entity, fan: FanOut) -> Self;
}

#[async_trait]
impl Node for UnitAggregate {
    type Entity = Unit;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.unit.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.unit = Some(mailbox);
    }

    async fn assemble(row: Unit, _fan: FanOut) -> Self {
        Self { entity: row }
    }
}

#[async_trait]
impl Node for IngredientAggregate {
    type Entity = Ingredient;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.ingredient.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.ingredient = Some(mailbox);
    }

    async fn assemble(row: Ingredient, _fan: FanOut) -> Self {
        Self { entity: row }
    }
}

#[async_trait]
impl Node for AltNameAggregate {
    type Entity = AltName;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.alt_name.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.alt_name = Some(mailbox);
    }

    async fn assemble(row: AltName, _fan: FanOut) -> Self {
        Self { entity: row }
    }
}

#[async_trait]
impl Node for PictureAggregate {
    type Entity = Picture;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.picture.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.picture = Some(mailbox);
    }

    async fn assemble(row: Picture, mut fan: FanOut) -> Self {
        let alt_names = fan
            .many::<AltNameAggregate>(AggregateQuery::children_of(row.id, row.user_id))
            .await;
        Self {
            entity: row,
            alt_names: alt_names.resolve().await,
        }
    }
}

#[async_trait]
impl Node for CategoryAggregate {
    type Entity = Category;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.category.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.category = Some(mailbox);
    }

    async fn assemble(row: Category, mut fan: FanOut) -> Self {
        let owned = AggregateQuery::children_of(row.id, row.user_id);
        let pictures = fan.many::<PictureAggregate>(owned.clone()).await;
        let alt_names = fan.many::<AltNameAggregate>(owned).await;

        let (pictures, alt_names) = tokio::join!(pictures.resolve(), alt_names.resolve());
        Self {
            entity: row,
            pictures,
            alt_names,
        }
    }
}

#[async_trait]
impl Node for RecipeMeasureAggregate {
    type Entity = RecipeMeasure;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.recipe_measure.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.recipe_measure = Some(mailbox);
    }

    async fn assemble(row: RecipeMeasure, mut fan: FanOut) -> Self {
        let unit = fan
            .one::<UnitAggregate>(AggregateQuery::row(row.unit_id, row.user_id))
            .await;
        let alt_names = fan
            .many::<AltNameAggregate>(AggregateQuery::children_of(row.id, row.user_id))
            .await;

        let (unit, alt_names) = tokio::join!(unit.resolve(), alt_names.resolve());
        Self {
            entity: row,
            unit,
            alt_names,
        }
    }
}

#[async_trait]
impl Node for RecipeIngredientAggregate {
    type Entity = RecipeIngredient;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.recipe_ingredient.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.recipe_ingredient = Some(mailbox);
    }

    async fn assemble(row: RecipeIngredient, mut fan: FanOut) -> Self {
        let owned = AggregateQuery::children_of(row.id, row.user_id);
        let measures = fan.many::<RecipeMeasureAggregate>(owned.clone()).await;
        let ingredient = fan
            .one::<IngredientAggregate>(AggregateQuery::row(row.derive_id, row.user_id))
            .await;
        let pictures = fan.many::<PictureAggregate>(owned.clone()).await;
        let alt_names = fan.many::<AltNameAggregate>(owned).await;

        let (measures, ingredient, pictures, alt_names) = tokio::join!(
            measures.resolve(),
            ingredient.resolve(),
            pictures.resolve(),
            alt_names.resolve()
        );
        Self {
            entity: row,
            measures,
            ingredient,
            pictures,
            alt_names,
        }
    }
}

#[async_trait]
impl Node for RecipeProcessAggregate {
    type Entity = RecipeProcess;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.recipe_process.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.recipe_process = Some(mailbox);
    }

    async fn assemble(row: RecipeProcess, mut fan: FanOut) -> Self {
        let owned = AggregateQuery::children_of(row.id, row.user_id);
        let pictures = fan.many::<PictureAggregate>(owned.clone()).await;
        let alt_names = fan.many::<AltNameAggregate>(owned).await;

        let (pictures, alt_names) = tokio::join!(pictures.resolve(), alt_names.resolve());
        Self {
            entity: row,
            pictures,
            alt_names,
        }
    }
}

#[async_trait]
impl Node for RecipeCategoryAggregate {
    type Entity = RecipeCategory;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.recipe_category.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.recipe_category = Some(mailbox);
    }

    async fn assemble(row: RecipeCategory, mut fan: FanOut) -> Self {
        let category = fan
            .one::<CategoryAggregate>(AggregateQuery::row(row.derive_id, row.user_id))
            .await;
        Self {
            entity: row,
            category: category.resolve().await,
        }
    }
}

#[async_trait]
impl Node for RecipeAggregate {
    type Entity = Recipe;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.recipe.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.recipe = Some(mailbox);
    }

    async fn assemble(row: Recipe, mut fan: FanOut) -> Self {
        let owned = AggregateQuery::children_of(row.id, row.user_id);
        let categories = fan.many::<RecipeCategoryAggregate>(owned.clone()).await;
        let ingredients = fan.many::<RecipeIngredientAggregate>(owned.clone()).await;
        let processes = fan.many::<RecipeProcessAggregate>(owned.clone()).await;
        let pictures = fan.many::<PictureAggregate>(owned.clone()).await;
        let alt_names = fan.many::<AltNameAggregate>(owned).await;

        let (categories, ingredients, processes, pictures, alt_names) = tokio::join!(
            categories.resolve(),
            ingredients.resolve(),
            processes.resolve(),
            pictures.resolve(),
            alt_names.resolve()
        );
        Self {
            entity: row,
            categories,
            ingredients,
            processes,
            pictures,
            alt_names,
        }
    }
}

#[async_trait]
impl Node for PlannerRecipeAggregate {
    type Entity = PlannerRecipe;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.planner_recipe.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.planner_recipe = Some(mailbox);
    }

    async fn assemble(row: PlannerRecipe, fan: FanOut) -> Self {
        let recipe = fan.nested_recipe(row.recipe_id, row.user_id).await;
        Self { entity: row, recipe }
    }
}

#[async_trait]
impl Node for PlannerIntervalAggregate {
    type Entity = PlannerInterval;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.planner_interval.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.planner_interval = Some(mailbox);
    }

    async fn assemble(row: PlannerInterval, mut fan: FanOut) -> Self {
        let recipes = fan
            .many::<PlannerRecipeAggregate>(AggregateQuery::children_of(row.id, row.user_id))
            .await;
        Self {
            entity: row,
            recipes: recipes.resolve().await,
        }
    }
}

#[async_trait]
impl Node for PlannerAggregate {
    type Entity = Planner;

    fn mailbox(router: &Router) -> Option<&Mailbox<Self>> {
        router.planner.as_ref()
    }

    fn install(router: &mut Router, mailbox: Mailbox<Self>) {
        router.planner = Some(mailbox);
    }

    async fn assemble(row: Planner, mut fan: FanOut) -> Self {
        let intervals = fan
            .many::<PlannerIntervalAggregate>(AggregateQuery::children_of(row.id, row.user_id))
            .await;
        Self {
            entity: row,
            intervals: intervals.resolve().await,
        }
    }
}
