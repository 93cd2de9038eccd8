//! Shared fixtures for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use larder::domain::*;
use larder::repository::{
    Criteria, Dataset, Repositories, Repository, RepositoryError, RepositoryResult,
};
use larder::{Engine, EngineConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Builder for a dataset owned by one user
pub struct Kitchen {
    pub user: Id,
    pub dataset: Dataset,
}

/// Ids of a recipe whose every branch resolves to at least one row
pub struct FullRecipe {
    pub recipe: Id,
    pub category: Id,
    pub ingredient: Id,
    pub recipe_ingredient: Id,
    pub unit: Id,
    pub process: Id,
}

impl Default for Kitchen {
    fn default() -> Self {
        Self::new()
    }
}

impl Kitchen {
    pub fn new() -> Self {
        Self::for_user(Id::new())
    }

    pub fn for_user(user: Id) -> Self {
        Self {
            user,
            dataset: Dataset::default(),
        }
    }

    pub fn repositories(&self) -> Repositories {
        self.dataset.clone().into_repositories()
    }

    pub fn engine(&self) -> Engine {
        self.engine_with(EngineConfig::default())
    }

    pub fn engine_with(&self, config: EngineConfig) -> Engine {
        Engine::new(self.repositories(), config)
    }

    pub fn unit(&mut self, name: &str) -> Id {
        let id = Id::new();
        self.dataset.units.push(Unit {
            id,
            user_id: self.user,
            name: name.into(),
            abbreviation: None,
        });
        id
    }

    pub fn ingredient(&mut self, name: &str) -> Id {
        let id = Id::new();
        self.dataset.ingredients.push(Ingredient {
            id,
            user_id: self.user,
            name: name.into(),
        });
        id
    }

    pub fn category(&mut self, name: &str) -> Id {
        let id = Id::new();
        self.dataset.categories.push(Category {
            id,
            user_id: self.user,
            name: name.into(),
        });
        id
    }

    pub fn recipe(&mut self, name: &str) -> Id {
        let id = Id::new();
        self.dataset.recipes.push(Recipe {
            id,
            user_id: self.user,
            name: name.into(),
            description: None,
            servings: Some(2),
        });
        id
    }

    pub fn tag(&mut self, recipe: Id, category: Id) -> Id {
        let id = Id::new();
        self.dataset.recipe_categories.push(RecipeCategory {
            id,
            user_id: self.user,
            entity_id: recipe,
            derive_id: category,
        });
        id
    }

    pub fn use_ingredient(&mut self, recipe: Id, ingredient: Id) -> Id {
        let id = Id::new();
        self.dataset.recipe_ingredients.push(RecipeIngredient {
            id,
            user_id: self.user,
            entity_id: recipe,
            derive_id: ingredient,
            note: None,
        });
        id
    }

    pub fn measure(&mut self, recipe_ingredient: Id, unit: Id, value: f64) -> Id {
        let id = Id::new();
        self.dataset.recipe_measures.push(RecipeMeasure {
            id,
            user_id: self.user,
            entity_id: recipe_ingredient,
            unit_id: unit,
            value,
        });
        id
    }

    pub fn process(&mut self, recipe: Id, name: &str) -> Id {
        let id = Id::new();
        let position = self.dataset.recipe_processes.len() as u32;
        self.dataset.recipe_processes.push(RecipeProcess {
            id,
            user_id: self.user,
            entity_id: recipe,
            name: name.into(),
            description: None,
            position,
        });
        id
    }

    pub fn picture(&mut self, parent: Id, uri: &str) -> Id {
        let id = Id::new();
        self.dataset.pictures.push(Picture {
            id,
            user_id: self.user,
            entity_id: parent,
            uri: uri.into(),
            position: 0,
        });
        id
    }

    pub fn alt_name(&mut self, parent: Id, name: &str) -> Id {
        let id = Id::new();
        self.dataset.alt_names.push(AltName {
            id,
            user_id: self.user,
            entity_id: parent,
            name: name.into(),
            locale: Some("fr".into()),
        });
        id
    }

    pub fn planner(&mut self, name: &str) -> Id {
        let id = Id::new();
        self.dataset.planners.push(Planner {
            id,
            user_id: self.user,
            name: name.into(),
            starts_on: None,
            ends_on: None,
        });
        id
    }

    pub fn interval(&mut self, planner: Id, name: &str) -> Id {
        let id = Id::new();
        self.dataset.planner_intervals.push(PlannerInterval {
            id,
            user_id: self.user,
            entity_id: planner,
            name: name.into(),
            starts_on: None,
        });
        id
    }

    pub fn schedule(&mut self, interval: Id, recipe: Id) -> Id {
        let id = Id::new();
        self.dataset.planner_recipes.push(PlannerRecipe {
            id,
            user_id: self.user,
            entity_id: interval,
            recipe_id: recipe,
            servings: None,
        });
        id
    }

    /// One picture carrying one alt name, plus one alt name, on `parent`
    pub fn decorate(&mut self, parent: Id) {
        let picture = self.picture(parent, "file:///photo.jpg");
        self.alt_name(picture, "photo");
        self.alt_name(parent, "alias");
    }

    /// A recipe with every child collection populated down to the leaves
    pub fn full_recipe(&mut self, name: &str, unit: Id, ingredient: Id, amount: f64) -> FullRecipe {
        let recipe = self.recipe(name);
        self.decorate(recipe);

        let category = self.category("baking");
        self.decorate(category);
        self.tag(recipe, category);

        let recipe_ingredient = self.use_ingredient(recipe, ingredient);
        self.decorate(recipe_ingredient);
        let measure = self.measure(recipe_ingredient, unit, amount);
        self.alt_name(measure, "portion");

        let process = self.process(recipe, "knead");
        self.decorate(process);

        FullRecipe {
            recipe,
            category,
            ingredient,
            recipe_ingredient,
            unit,
            process,
        }
    }
}

/// Repository whose `find_all` always fails
pub struct Faulty<E: Entity> {
    inner: Arc<dyn Repository<E>>,
    calls: AtomicUsize,
}

impl<E: Entity> Faulty<E> {
    pub fn wrap(inner: Arc<dyn Repository<E>>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for Faulty<E> {
    async fn find_one(&self, criteria: Criteria) -> RepositoryResult<Option<E>> {
        self.inner.find_one(criteria).await
    }

    async fn find_all(&self, _criteria: Criteria) -> RepositoryResult<Vec<E>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::database("connection reset"))
    }

    async fn insert_one(&self, row: E) -> RepositoryResult<E> {
        self.inner.insert_one(row).await
    }

    async fn update_one(&self, criteria: Criteria, patch: serde_json::Value) -> RepositoryResult<E> {
        self.inner.update_one(criteria, patch).await
    }

    async fn delete_one(&self, criteria: Criteria) -> RepositoryResult<E> {
        self.inner.delete_one(criteria).await
    }
}

/// Repository counting `find_all` calls and optionally slowing them down
pub struct Counting<E: Entity> {
    inner: Arc<dyn Repository<E>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl<E: Entity> Counting<E> {
    pub fn wrap(inner: Arc<dyn Repository<E>>) -> Arc<Self> {
        Self::slow(inner, None)
    }

    pub fn slow(inner: Arc<dyn Repository<E>>, delay: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for Counting<E> {
    async fn find_one(&self, criteria: Criteria) -> RepositoryResult<Option<E>> {
        self.inner.find_one(criteria).await
    }

    async fn find_all(&self, criteria: Criteria) -> RepositoryResult<Vec<E>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.find_all(criteria).await
    }

    async fn insert_one(&self, row: E) -> RepositoryResult<E> {
        self.inner.insert_one(row).await
    }

    async fn update_one(&self, criteria: Criteria, patch: serde_json::Value) -> RepositoryResult<E> {
        self.inner.update_one(criteria, patch).await
    }

    async fn delete_one(&self, criteria: Criteria) -> RepositoryResult<E> {
        self.inner.delete_one(criteria).await
    }
}
