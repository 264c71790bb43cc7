// ABOUTME: Diet recommender tests against the shipped food table
// ABOUTME: Verifies preference filtering, per-slot limits, fallbacks, and seeded reproducibility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
//! Diet recommender tests

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutriplan::external::FoodTable;
use nutriplan::intelligence::{meal_calorie_targets, DietRecommender};
use nutriplan::models::{CalorieTarget, DietPreference, FoodItem, FoodType, MealSlot};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod common;

fn shipped_recommender() -> DietRecommender {
    let (table, _) = FoodTable::load(&common::shipped_food_table()).unwrap();
    assert!(!table.is_empty(), "shipped food table should have rows");
    DietRecommender::new(table.into_items())
}

fn target(kcal: u32) -> CalorieTarget {
    CalorieTarget::new(kcal).unwrap()
}

fn item(name: &str, food_type: FoodType, meal: MealSlot) -> FoodItem {
    FoodItem {
        name: name.to_owned(),
        food_type,
        calories: 200.0,
        protein_g: 10.0,
        carbs_g: 20.0,
        fat_g: 5.0,
        meal,
    }
}

#[test]
fn test_veg_preference_never_returns_non_veg() {
    let recommender = shipped_recommender();

    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let plan = recommender.recommend_diet(target(2000), DietPreference::Veg, &mut rng);

        assert_eq!(plan.len(), MealSlot::ALL.len());
        for (slot, items) in plan.iter() {
            for food in items {
                assert_eq!(food.food_type, FoodType::Veg, "{} in {slot}", food.name);
            }
        }
    }
}

#[test]
fn test_each_slot_gets_at_most_two_tagged_items() {
    let recommender = shipped_recommender();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let plan = recommender.recommend_diet(target(2400), DietPreference::NonVeg, &mut rng);

    let summed: f64 = plan
        .iter()
        .flat_map(|(_, items)| items)
        .map(|food| food.calories)
        .sum();
    assert!((plan.total_calories() - summed).abs() < 1e-9);
    assert!(plan.total_calories() > 0.0);

    for slot in MealSlot::ALL {
        let items = plan.get(slot).expect("slot populated");
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|food| food.meal == slot));
        assert_ne!(items[0].name, items[1].name, "sampled without replacement");
    }
}

#[test]
fn test_same_seed_gives_same_plan() {
    let recommender = shipped_recommender();

    let first = recommender.recommend_diet(
        target(1800),
        DietPreference::Other,
        &mut ChaCha8Rng::seed_from_u64(11),
    );
    let second = recommender.recommend_diet(
        target(1800),
        DietPreference::Other,
        &mut ChaCha8Rng::seed_from_u64(11),
    );

    assert_eq!(first, second);
}

#[test]
fn test_empty_table_gives_empty_plan() {
    let recommender = DietRecommender::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let plan = recommender.recommend_diet(target(2000), DietPreference::Veg, &mut rng);

    assert!(plan.is_empty());
    assert_eq!(serde_json::to_string(&plan).unwrap(), "{}");
}

#[test]
fn test_preference_filter_removing_everything_gives_empty_plan() {
    let recommender = DietRecommender::new(vec![
        item("Chicken", FoodType::NonVeg, MealSlot::Lunch),
        item("Fish", FoodType::NonVeg, MealSlot::Dinner),
    ]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let plan = recommender.recommend_diet(target(2000), DietPreference::Veg, &mut rng);
    assert!(plan.is_empty());
}

#[test]
fn test_untagged_slot_falls_back_to_whole_table() {
    let recommender = DietRecommender::new(vec![
        item("Poha", FoodType::Veg, MealSlot::Breakfast),
        item("Dal", FoodType::Veg, MealSlot::Lunch),
        item("Khichdi", FoodType::Veg, MealSlot::Dinner),
    ]);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let plan = recommender.recommend_diet(target(2000), DietPreference::Veg, &mut rng);

    assert_eq!(plan.len(), 4);
    assert_eq!(plan.get(MealSlot::Breakfast).unwrap().len(), 1);
    assert_eq!(plan.get(MealSlot::Snacks).unwrap().len(), 2);
}

#[test]
fn test_meal_targets_split_daily_calories() {
    let targets = meal_calorie_targets(target(2000));

    assert_eq!(
        targets.map(|(slot, _)| slot),
        [
            MealSlot::Breakfast,
            MealSlot::Lunch,
            MealSlot::Snacks,
            MealSlot::Dinner
        ]
    );
    let kcal = targets.map(|(_, kcal)| kcal);
    for (actual, expected) in kcal.iter().zip([500.0, 700.0, 200.0, 600.0]) {
        assert!((actual - expected).abs() < 1e-9);
    }
}
