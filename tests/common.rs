// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, small training configs, and temp-dir planner configs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `nutriplan`

use std::path::{Path, PathBuf};
use std::sync::Once;

use nutriplan::config::{PlannerConfig, TrainingConfig};
use nutriplan::services::EstimationRequest;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Training parameters small enough for fast tests
pub fn small_training_config() -> TrainingConfig {
    TrainingConfig {
        n_samples: 200,
        n_estimators: 10,
        ..TrainingConfig::default()
    }
}

/// Food table shipped with the repository
pub fn shipped_food_table() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/food_data.csv")
}

/// Planner config writing its model into `dir`, reading the shipped food
/// table, and sampling diets with a fixed seed
pub fn test_planner_config(dir: &Path) -> PlannerConfig {
    PlannerConfig {
        model_path: dir.join("model.json"),
        food_table_path: shipped_food_table(),
        training: small_training_config(),
        diet_seed: Some(7),
    }
}

/// A complete, valid request
pub fn sample_request() -> EstimationRequest {
    EstimationRequest {
        age: Some("30".into()),
        gender: Some("male".into()),
        height: Some("175".into()),
        weight: Some("70".into()),
        activity: Some("moderately_active".into()),
        goal: Some("maintain".into()),
        preference: Some("veg".into()),
    }
}
