//! Pure reduction of a planner aggregate into ingredient totals

use std::collections::HashMap;

use crate::domain::{Id, PlannerAggregate, PlannerCalculation, RecipeAggregate};

/// Sum every measure of every scheduled recipe per (ingredient, unit)
///
/// # Arguments
///
/// * `planner` - A fully built planner aggregate
///
/// # Returns
///
/// One entry per `(ingredient derive id, unit id)` pair in first-seen
/// order. Measures whose ingredient or unit did not resolve are skipped.
pub fn calculate(planner: &PlannerAggregate) -> Vec<PlannerCalculation> {
    let recipes = planner
        .intervals
        .iter()
        .flat_map(|interval| interval.recipes.iter())
        .filter_map(|scheduled| scheduled.recipe.as_ref());

    let mut totals = Totals::default();
    for recipe in recipes {
        totals.add_recipe(recipe);
    }
    totals.entries
}

#[derive(Default)]
struct Totals {
    index: HashMap<(Id, Id), usize>,
    entries: Vec<PlannerCalculation>,
}

impl Totals {
    fn add_recipe(&mut self, recipe: &RecipeAggregate) {
        for line in &recipe.ingredients {
            let Some(ingredient) = &line.ingredient else {
                continue;
            };
            for measure in &line.measures {
                let Some(unit) = &measure.unit else {
                    continue;
                };

                let key = (line.entity.derive_id, measure.entity.unit_id);
                match self.index.get(&key) {
                    Some(&position) => self.entries[position].amount += measure.entity.value,
                    None => {
                        self.index.insert(key, self.entries.len());
                        self.entries.push(PlannerCalculation {
                            ingredient: ingredient.clone(),
                            unit: unit.clone(),
                            amount: measure.entity.value,
                        });
                    }
                }
            }
        }
    }
}
