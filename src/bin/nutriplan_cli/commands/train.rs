// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
// ABOUTME: Train command retraining the calorie model regardless of any existing artifact
// ABOUTME: Prints a training summary and the report as JSON

use nutriplan::config::PlannerConfig;
use nutriplan::errors::AppResult;
use nutriplan::intelligence::CalorieEstimator;

use crate::helpers::display::{display_training_report, print_json};

/// Retrain, persist, and report
pub fn run(config: &PlannerConfig) -> AppResult<()> {
    let estimator = CalorieEstimator::from_config(config);
    let report = estimator.retrain()?;

    display_training_report(&report);
    print_json(&report)
}
