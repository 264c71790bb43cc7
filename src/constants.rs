// ABOUTME: Application constants for environment variable names, defaults, and artifact format
// ABOUTME: Re-exports physiological constants from nutriplan-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Constants module
//!
//! Domain constants (formula coefficients, meal shares, calorie floor) live
//! in `nutriplan-core` and are re-exported here alongside settings that only
//! the main crate uses.

pub use nutriplan_core::constants::*;

/// Environment variable names read by `PlannerConfig::from_env`
pub mod env_config {
    /// Model artifact path
    pub const MODEL_PATH: &str = "NUTRIPLAN_MODEL_PATH";
    /// Food table CSV path
    pub const FOOD_TABLE_PATH: &str = "NUTRIPLAN_FOOD_TABLE_PATH";
    /// Number of synthetic training rows
    pub const TRAINING_SAMPLES: &str = "NUTRIPLAN_TRAINING_SAMPLES";
    /// Seed for data generation, splitting, and bootstrapping
    pub const TRAINING_SEED: &str = "NUTRIPLAN_TRAINING_SEED";
    /// Number of trees in the forest
    pub const FOREST_TREES: &str = "NUTRIPLAN_FOREST_TREES";
    /// Held-out fraction for R² scoring
    pub const TEST_FRACTION: &str = "NUTRIPLAN_TEST_FRACTION";
    /// Optional fixed seed for diet sampling
    pub const DIET_SEED: &str = "NUTRIPLAN_DIET_SEED";
}

/// Default configuration values
pub mod defaults {
    /// Default model artifact path
    pub const MODEL_PATH: &str = "model.json";
    /// Default food table path
    pub const FOOD_TABLE_PATH: &str = "data/food_data.csv";
    /// Default synthetic row count
    pub const TRAINING_SAMPLES: usize = 1000;
    /// Default seed
    pub const TRAINING_SEED: u64 = 42;
    /// Default tree count
    pub const FOREST_TREES: usize = 100;
    /// Default held-out fraction
    pub const TEST_FRACTION: f64 = 0.2;
}

/// Model artifact envelope
pub mod artifact {
    /// Current serialized format version; other versions are rejected on load
    pub const FORMAT_VERSION: u32 = 1;
    /// Suffix of the sibling file written before the atomic rename
    pub const TEMP_SUFFIX: &str = "tmp";
}
