//! Integration tests for nested planner recipes and planner calculation

mod common;

use anyhow::Result;
use common::{Counting, Kitchen};
use larder::domain::{EntityKind, Id};
use larder::error::FailureCause;
use larder::{AggregateQuery, Engine, EngineConfig, EngineError};

#[tokio::test]
async fn test_planner_recipe_embeds_the_direct_recipe_build() -> Result<()> {
    let mut kitchen = Kitchen::new();
    let gram = kitchen.unit("gram");
    let flour = kitchen.ingredient("flour");
    let bread = kitchen.full_recipe("bread", gram, flour, 500.0);
    let planner = kitchen.planner("week");
    let monday = kitchen.interval(planner, "monday");
    kitchen.schedule(monday, bread.recipe);

    let engine = kitchen.engine();
    let direct = engine
        .build_recipes_aggregate(AggregateQuery::by_id(bread.recipe).with_user_id(kitchen.user))
        .await?
        .into_result()?;

    let built = engine
        .build_planners_aggregate(AggregateQuery::by_id(planner).with_user_id(kitchen.user))
        .await?;
    assert!(built.is_complete(), "unexpected failures: {:?}", built.failures);

    let scheduled = &built.aggregates[0].intervals[0].recipes[0];
    assert_eq!(scheduled.recipe.as_ref(), direct.first());
    Ok(())
}

#[tokio::test]
async fn test_recipe_scheduled_twice_resolves_once_per_call() -> Result<()> {
    let mut kitchen = Kitchen::new();
    let gram = kitchen.unit("gram");
    let flour = kitchen.ingredient("flour");
    let bread = kitchen.full_recipe("bread", gram, flour, 500.0);
    let planner = kitchen.planner("week");
    for day in ["monday", "tuesday", "wednesday"] {
        let interval = kitchen.interval(planner, day);
        kitchen.schedule(interval, bread.recipe);
    }

    let mut repos = kitchen.repositories();
    let recipes = Counting::wrap(repos.recipes.clone());
    repos.recipes = recipes.clone();
    let engine = Engine::new(repos, EngineConfig::default());

    let built = engine
        .build_planners_aggregate(AggregateQuery::by_id(planner))
        .await?;
    let resolved: Vec<_> = built.aggregates[0]
        .intervals
        .iter()
        .map(|interval| interval.recipes[0].recipe.clone())
        .collect();

    assert_eq!(resolved.len(), 3);
    assert!(resolved.iter().all(|r| r.is_some() && *r == resolved[0]));
    assert_eq!(recipes.calls(), 1);

    // A second call does not reuse the first call's results
    engine
        .build_planners_aggregate(AggregateQuery::by_id(planner))
        .await?;
    assert_eq!(recipes.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_missing_scheduled_recipe_reports_nested_failure() -> Result<()> {
    let mut kitchen = Kitchen::new();
    let planner = kitchen.planner("week");
    let monday = kitchen.interval(planner, "monday");
    let ghost = Id::new();
    kitchen.schedule(monday, ghost);

    let built = kitchen
        .engine()
        .build_planners_aggregate(AggregateQuery::by_id(planner))
        .await?;

    assert!(built.aggregates[0].intervals[0].recipes[0].recipe.is_none());
    let nested = built
        .failures
        .iter()
        .find(|f| f.kind == EntityKind::Recipe)
        .expect("nested recipe failure");
    assert_eq!(nested.depth, 1);
    assert_eq!(nested.request.id, Some(ghost));
    Ok(())
}

#[tokio::test]
async fn test_nesting_depth_guard() -> Result<()> {
    let mut kitchen = Kitchen::new();
    let recipe = kitchen.recipe("porridge");
    let planner = kitchen.planner("week");
    let monday = kitchen.interval(planner, "monday");
    kitchen.schedule(monday, recipe);

    let config = EngineConfig::default().with_max_nesting_depth(0);
    let built = kitchen
        .engine_with(config)
        .build_planners_aggregate(AggregateQuery::by_id(planner))
        .await?;

    assert!(built.aggregates[0].intervals[0].recipes[0].recipe.is_none());
    assert!(built.failures.iter().any(|f| matches!(
        f.cause,
        FailureCause::DepthExceeded { depth: 1, limit: 0 }
    )));
    Ok(())
}

#[tokio::test]
async fn test_calculate_sums_shared_ingredient_and_unit() -> Result<()> {
    let mut kitchen = Kitchen::new();
    let gram = kitchen.unit("gram");
    let cup = kitchen.unit("cup");
    let flour = kitchen.ingredient("flour");
    let milk = kitchen.ingredient("milk");

    let bread = kitchen.full_recipe("bread", gram, flour, 250.0);
    let pancakes = kitchen.full_recipe("pancakes", gram, flour, 125.5);
    let milk_line = kitchen.use_ingredient(pancakes.recipe, milk);
    kitchen.measure(milk_line, cup, 1.5);

    let planner = kitchen.planner("week");
    let monday = kitchen.interval(planner, "monday");
    let tuesday = kitchen.interval(planner, "tuesday");
    kitchen.schedule(monday, bread.recipe);
    kitchen.schedule(tuesday, pancakes.recipe);

    let totals = kitchen
        .engine()
        .planner_calculate(planner, kitchen.user)
        .await?;

    let summary: Vec<_> = totals
        .iter()
        .map(|c| (c.ingredient.entity.id, c.unit.entity.id, c.amount))
        .collect();
    assert_eq!(summary, vec![(flour, gram, 375.5), (milk, cup, 1.5)]);
    Ok(())
}

#[tokio::test]
async fn test_calculate_unknown_planner_is_not_found() {
    let kitchen = Kitchen::new();
    let result = kitchen
        .engine()
        .planner_calculate(Id::new(), kitchen.user)
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn test_calculate_fails_on_fetch_errors() -> Result<()> {
    let mut kitchen = Kitchen::new();
    let gram = kitchen.unit("gram");
    let flour = kitchen.ingredient("flour");
    let bread = kitchen.full_recipe("bread", gram, flour, 1.0);
    let planner = kitchen.planner("week");
    let monday = kitchen.interval(planner, "monday");
    kitchen.schedule(monday, bread.recipe);

    let mut repos = kitchen.repositories();
    repos.recipe_measures = common::Faulty::wrap(repos.recipe_measures.clone());
    let engine = Engine::new(repos, EngineConfig::default());

    match engine.planner_calculate(planner, kitchen.user).await {
        Err(EngineError::Incomplete { failures }) => {
            assert!(failures.iter().all(|f| f.is_fetch()));
            assert_eq!(failures[0].kind, EntityKind::RecipeMeasure);
        }
        other => panic!("expected incomplete calculation, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_calculate_with_cancel_on_failure_tolerates_empty_interval() -> Result<()> {
    let mut kitchen = Kitchen::new();
    let gram = kitchen.unit("gram");
    let flour = kitchen.ingredient("flour");
    let bread = kitchen.full_recipe("bread", gram, flour, 500.0);
    let planner = kitchen.planner("week");
    let monday = kitchen.interval(planner, "monday");
    kitchen.interval(planner, "tuesday");
    kitchen.schedule(monday, bread.recipe);

    let engine = kitchen.engine_with(EngineConfig::default().with_cancel_on_failure(true));
    let totals = engine.planner_calculate(planner, kitchen.user).await?;

    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].ingredient.entity.id, flour);
    assert_eq!(totals[0].amount, 500.0);
    Ok(())
}
