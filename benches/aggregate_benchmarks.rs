//! Performance benchmarks for aggregate builds

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use larder::domain::*;
use larder::repository::Dataset;
use larder::{AggregateQuery, Engine, EngineConfig};
use std::hint::black_box;
use std::time::Duration;
use tokio::runtime::Runtime;

struct Seeded {
    engine: Engine,
    user: Id,
    planner: Id,
}

/// Dataset with `recipes` recipes, each carrying `lines` ingredient lines,
/// all scheduled into a single-interval planner
fn seed(recipes: usize, lines: usize, config: EngineConfig) -> Seeded {
    let user = Id::new();
    let mut data = Dataset::default();

    let unit = Id::new();
    data.units.push(Unit {
        id: unit,
        user_id: user,
        name: "gram".into(),
        abbreviation: Some("g".into()),
    });

    let planner = Id::new();
    data.planners.push(Planner {
        id: planner,
        user_id: user,
        name: "week".into(),
        starts_on: None,
        ends_on: None,
    });
    let interval = Id::new();
    data.planner_intervals.push(PlannerInterval {
        id: interval,
        user_id: user,
        entity_id: planner,
        name: "monday".into(),
        starts_on: None,
    });

    for r in 0..recipes {
        let recipe = Id::new();
        data.recipes.push(Recipe {
            id: recipe,
            user_id: user,
            name: format!("recipe_{r}"),
            description: None,
            servings: None,
        });
        data.planner_recipes.push(PlannerRecipe {
            id: Id::new(),
            user_id: user,
            entity_id: interval,
            recipe_id: recipe,
            servings: None,
        });

        for l in 0..lines {
            let ingredient = Id::new();
            data.ingredients.push(Ingredient {
                id: ingredient,
                user_id: user,
                name: format!("ingredient_{r}_{l}"),
            });
            let line = Id::new();
            data.recipe_ingredients.push(RecipeIngredient {
                id: line,
                user_id: user,
                entity_id: recipe,
                derive_id: ingredient,
                note: None,
            });
            data.recipe_measures.push(RecipeMeasure {
                id: Id::new(),
                user_id: user,
                entity_id: line,
                unit_id: unit,
                value: l as f64,
            });
            data.alt_names.push(AltName {
                id: Id::new(),
                user_id: user,
                entity_id: line,
                name: format!("alias_{l}"),
                locale: None,
            });
        }
    }

    Seeded {
        engine: Engine::new(data.into_repositories(), config),
        user,
        planner,
    }
}

fn bench_recipe_builds(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("recipe_build");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));

    for recipes in [1, 10, 50] {
        let seeded = seed(recipes, 8, EngineConfig::default());
        group.bench_with_input(BenchmarkId::new("by_owner", recipes), &seeded, |b, seeded| {
            b.to_async(&rt).iter(|| async {
                let built = seeded
                    .engine
                    .build_recipes_aggregate(AggregateQuery::owned_by(seeded.user))
                    .await
                    .unwrap();
                black_box(built);
            });
        });
    }
    group.finish();
}

fn bench_channel_capacity(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("channel_capacity");
    for capacity in [1, 4, 32] {
        let config = EngineConfig::default().with_channel_capacity(capacity);
        let seeded = seed(20, 8, config);
        group.bench_with_input(BenchmarkId::new("recipes", capacity), &seeded, |b, seeded| {
            b.to_async(&rt).iter(|| async {
                let built = seeded
                    .engine
                    .build_recipes_aggregate(AggregateQuery::owned_by(seeded.user))
                    .await
                    .unwrap();
                black_box(built);
            });
        });
    }
    group.finish();
}

fn bench_planner_calculate(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let seeded = seed(10, 8, EngineConfig::default());

    c.bench_function("planner_calculate", |b| {
        b.to_async(&rt).iter(|| async {
            let totals = seeded
                .engine
                .planner_calculate(seeded.planner, seeded.user)
                .await
                .unwrap();
            black_box(totals);
        });
    });
}

criterion_group!(
    benches,
    bench_recipe_builds,
    bench_channel_capacity,
    bench_planner_calculate
);

criterion_main!(benches);
