// ABOUTME: Calorie intelligence crate: metric formulas, regression forest, and diet selection
// ABOUTME: Pure computation with no I/O; persistence and orchestration live in the main crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Nutriplan Intelligence
//!
//! Algorithms behind calorie estimation, extracted from the main crate so
//! they compile in parallel and can be tested without touching the
//! filesystem.
//!
//! ## Modules
//!
//! - **`metrics_calculator`**: BMI, BMI category, Mifflin-St Jeor BMR, TDEE
//! - **`ml`**: synthetic data, CART regression trees, random forest, R²
//! - **`diet_recommender`**: per-slot food sampling for a calorie target
//! - **config**: validated training parameters

/// Training configuration and validation
pub mod config;
/// Meal selection from the food table
pub mod diet_recommender;
/// Body metric formulas
pub mod metrics_calculator;
/// Regression learning primitives
pub mod ml;

pub use config::{ConfigError, TrainingConfig};
pub use diet_recommender::{meal_calorie_targets, DietRecommender};
pub use metrics_calculator::{
    bmi_category, calculate_bmi, calculate_bmr, calculate_metrics, calculate_tdee,
    mifflin_st_jeor, round2,
};
pub use ml::{MlError, RandomForestRegressor};
