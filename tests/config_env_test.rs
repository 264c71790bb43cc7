// ABOUTME: Tests for environment-driven planner configuration
// ABOUTME: Mutates process environment variables, so every test is serialized
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
//! Environment configuration tests

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use nutriplan::config::PlannerConfig;
use nutriplan::constants::env_config;
use serial_test::serial;

mod common;

const ALL_VARS: [&str; 7] = [
    env_config::MODEL_PATH,
    env_config::FOOD_TABLE_PATH,
    env_config::TRAINING_SAMPLES,
    env_config::TRAINING_SEED,
    env_config::FOREST_TREES,
    env_config::TEST_FRACTION,
    env_config::DIET_SEED,
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = PlannerConfig::from_env().unwrap();

    assert_eq!(config, PlannerConfig::default());
    assert_eq!(config.food_table_path, PathBuf::from("data/food_data.csv"));
    assert_eq!(config.training.n_samples, 1000);
    assert!((config.training.test_fraction - 0.2).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_env();
    env::set_var(env_config::MODEL_PATH, "/var/lib/nutriplan/model.json");
    env::set_var(env_config::FOOD_TABLE_PATH, "/srv/foods.csv");
    env::set_var(env_config::TRAINING_SAMPLES, " 500 ");
    env::set_var(env_config::TEST_FRACTION, "0.25");
    env::set_var(env_config::DIET_SEED, "99");

    let config = PlannerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(
        config.model_path,
        PathBuf::from("/var/lib/nutriplan/model.json")
    );
    assert_eq!(config.food_table_path, PathBuf::from("/srv/foods.csv"));
    assert_eq!(config.training.n_samples, 500);
    assert_eq!(config.training.test_rows(), 125);
    assert_eq!(config.diet_seed, Some(99));
}

#[test]
#[serial]
fn test_from_env_rejects_bad_seed() {
    clear_env();
    env::set_var(env_config::DIET_SEED, "-3");

    let result = PlannerConfig::from_env();
    clear_env();

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains(env_config::DIET_SEED));
}

#[test]
#[serial]
fn test_from_env_rejects_zero_trees() {
    clear_env();
    env::set_var(env_config::FOREST_TREES, "0");

    let result = PlannerConfig::from_env();
    clear_env();

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("n_estimators"));
}

#[test]
#[serial]
fn test_summary_mentions_paths() {
    clear_env();
    let summary = PlannerConfig::from_env().unwrap().summary();

    assert!(summary.contains("model.json"));
    assert!(summary.contains("Diet Seed: random"));
}
