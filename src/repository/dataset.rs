//! Fixture files that seed the in-memory repositories

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

use super::error::{RepositoryError, RepositoryResult};
use super::memory::MemoryRepository;
use super::traits::Repositories;
use crate::domain::*;

/// Every table's rows, as stored in a JSON or YAML fixture
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub recipes: Vec<Recipe>,
    pub categories: Vec<Category>,
    pub ingredients: Vec<Ingredient>,
    pub units: Vec<Unit>,
    pub pictures: Vec<Picture>,
    pub alt_names: Vec<AltName>,
    pub recipe_categories: Vec<RecipeCategory>,
    pub recipe_ingredients: Vec<RecipeIngredient>,
    pub recipe_processes: Vec<RecipeProcess>,
    pub recipe_measures: Vec<RecipeMeasure>,
    pub planners: Vec<Planner>,
    pub planner_intervals: Vec<PlannerInterval>,
    pub planner_recipes: Vec<PlannerRecipe>,
}

impl Dataset {
    /// Load a fixture, picking the format from the file extension
    pub async fn load(path: &Path) -> RepositoryResult<Self> {
        let content = fs::read_to_string(path).await?;
        let dataset = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") | None => serde_json::from_str(&content)?,
            Some(other) => {
                return Err(RepositoryError::serialization(format!(
                    "unsupported dataset format: {other}"
                )))
            }
        };
        debug!("Loaded dataset from {}", path.display());
        Ok(dataset)
    }

    pub fn row_count(&self) -> usize {
        self.recipes.len()
            + self.categories.len()
            + self.ingredients.len()
            + self.units.len()
            + self.pictures.len()
            + self.alt_names.len()
            + self.recipe_categories.len()
            + self.recipe_ingredients.len()
            + self.recipe_processes.len()
            + self.recipe_measures.len()
            + self.planners.len()
            + self.planner_intervals.len()
            + self.planner_recipes.len()
    }

    /// Move every table into its own in-memory repository
    pub fn into_repositories(self) -> Repositories {
        Repositories {
            recipes: Arc::new(MemoryRepository::with_rows(self.recipes)),
            categories: Arc::new(MemoryRepository::with_rows(self.categories)),
            ingredients: Arc::new(MemoryRepository::with_rows(self.ingredients)),
            units: Arc::new(MemoryRepository::with_rows(self.units)),
            pictures: Arc::new(MemoryRepository::with_rows(self.pictures)),
            alt_names: Arc::new(MemoryRepository::with_rows(self.alt_names)),
            recipe_categories: Arc::new(MemoryRepository::with_rows(self.recipe_categories)),
            recipe_ingredients: Arc::new(MemoryRepository::with_rows(self.recipe_ingredients)),
            recipe_processes: Arc::new(MemoryRepository::with_rows(self.recipe_processes)),
            recipe_measures: Arc::new(MemoryRepository::with_rows(self.recipe_measures)),
            planners: Arc::new(MemoryRepository::with_rows(self.planners)),
            planner_intervals: Arc::new(MemoryRepository::with_rows(self.planner_intervals)),
            planner_recipes: Arc::new(MemoryRepository::with_rows(self.planner_recipes)),
        }
    }
}
