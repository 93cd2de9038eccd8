//! Repository interface consumed by the aggregation engine

use async_trait::async_trait;
use std::sync::Arc;

use super::criteria::Criteria;
use super::error::RepositoryResult;
use super::memory::MemoryRepository;
use crate::domain::*;

/// Per-entity-table storage operations
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Fresh criteria builder for this table
    fn criteria(&self) -> Criteria {
        Criteria::new()
    }

    /// First row matching the criteria
    async fn find_one(&self, criteria: Criteria) -> RepositoryResult<Option<E>>;

    /// All rows matching the criteria, in storage order
    async fn find_all(&self, criteria: Criteria) -> RepositoryResult<Vec<E>>;

    /// Insert a new row
    async fn insert_one(&self, row: E) -> RepositoryResult<E>;

    /// Merge a JSON patch into the first matching row and return the result
    async fn update_one(&self, criteria: Criteria, patch: serde_json::Value)
        -> RepositoryResult<E>;

    /// Delete the first matching row and return it
    async fn delete_one(&self, criteria: Criteria) -> RepositoryResult<E>;
}

/// One repository per entity table
#[derive(Clone)]
pub struct Repositories {
    pub recipes: Arc<dyn Repository<Recipe>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub ingredients: Arc<dyn Repository<Ingredient>>,
    pub units: Arc<dyn Repository<Unit>>,
    pub pictures: Arc<dyn Repository<Picture>>,
    pub alt_names: Arc<dyn Repository<AltName>>,
    pub recipe_categories: Arc<dyn Repository<RecipeCategory>>,
    pub recipe_ingredients: Arc<dyn Repository<RecipeIngredient>>,
    pub recipe_processes: Arc<dyn Repository<RecipeProcess>>,
    pub recipe_measures: Arc<dyn Repository<RecipeMeasure>>,
    pub planners: Arc<dyn Repository<Planner>>,
    pub planner_intervals: Arc<dyn Repository<PlannerInterval>>,
    pub planner_recipes: Arc<dyn Repository<PlannerRecipe>>,
}

impl Repositories {
    /// Empty in-memory repositories for every table
    pub fn in_memory() -> Self {
        Self {
            recipes: Arc::new(MemoryRepository::new()),
            categories: Arc::new(MemoryRepository::new()),
            ingredients: Arc::new(MemoryRepository::new()),
            units: Arc::new(MemoryRepository::new()),
            pictures: Arc::new(MemoryRepository::new()),
            alt_names: Arc::new(MemoryRepository::new()),
            recipe_categories: Arc::new(MemoryRepository::new()),
            recipe_ingredients: Arc::new(MemoryRepository::new()),
            recipe_processes: Arc::new(MemoryRepository::new()),
            recipe_measures: Arc::new(MemoryRepository::new()),
            planners: Arc::new(MemoryRepository::new()),
            planner_intervals: Arc::new(MemoryRepository::new()),
            planner_recipes: Arc::new(MemoryRepository::new()),
        }
    }

    /// Repository for entity type `E`
    pub fn of<E: Stored>(&self) -> Arc<dyn Repository<E>> {
        E::repository(self)
    }
}

/// Entities that have a slot in [`Repositories`]
pub trait Stored: Entity {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>>;
}

impl Stored for Recipe {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.recipes)
    }
}

impl Stored for Category {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.categories)
    }
}

impl Stored for Ingredient {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.ingredients)
    }
}

impl Stored for Unit {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.units)
    }
}

impl Stored for Picture {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.pictures)
    }
}

impl Stored for AltName {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.alt_names)
    }
}

impl Stored for RecipeCategory {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.recipe_categories)
    }
}

impl Stored for RecipeIngredient {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.recipe_ingredients)
    }
}

impl Stored for RecipeProcess {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.recipe_processes)
    }
}

impl Stored for RecipeMeasure {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.recipe_measures)
    }
}

impl Stored for Planner {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.planners)
    }
}

impl Stored for PlannerInterval {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.planner_intervals)
    }
}

impl Stored for PlannerRecipe {
    fn repository(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        Arc::clone(&repos.planner_recipes)
    }
}
