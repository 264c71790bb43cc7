// ABOUTME: End-to-end tests for the estimation service over shared planner resources
// ABOUTME: Covers the calorie floor, goal labels, preference filtering, and request-scoped validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
//! Estimation service tests

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::path::PathBuf;

use nutriplan::errors::{ErrorCode, ErrorResponse};
use nutriplan::external::FoodTableSource;
use nutriplan::intelligence::ModelLifecycle;
use nutriplan::models::{BmiCategory, CalorieTarget, FoodType, Goal};
use nutriplan::resources::PlannerResources;
use nutriplan::services::{estimate, metrics_for, EstimationRequest};

mod common;

use common::{init_test_logging, sample_request, test_planner_config};

// ============================================================================
// Goal adjustment and floor
// ============================================================================

#[test]
fn test_calorie_floor_applies_after_goal_offset() {
    assert_eq!(CalorieTarget::from_prediction(1000.0, Goal::Loss).kcal(), 1200);
    assert_eq!(CalorieTarget::from_prediction(1699.9, Goal::Loss).kcal(), 1200);
    assert_eq!(CalorieTarget::from_prediction(2000.0, Goal::Gain).kcal(), 2500);
    assert_eq!(CalorieTarget::from_prediction(2345.9, Goal::Maintain).kcal(), 2345);
    assert_eq!(CalorieTarget::from_prediction(f64::NAN, Goal::Maintain), CalorieTarget::FLOOR);
}

#[test]
fn test_explicit_target_below_floor_is_rejected() {
    let err = CalorieTarget::new(1199).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert_eq!(CalorieTarget::new(1200).unwrap(), CalorieTarget::FLOOR);
}

// ============================================================================
// Full estimation
// ============================================================================

#[test]
fn test_estimate_end_to_end() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let resources = PlannerResources::initialize(&test_planner_config(dir.path())).unwrap();
    assert_eq!(resources.model_lifecycle().unwrap(), ModelLifecycle::Trained);
    assert!(matches!(resources.food_source, FoodTableSource::Loaded { .. }));

    let request = EstimationRequest {
        goal: Some("LOSS".into()),
        ..sample_request()
    };
    let response = estimate(&resources, &request).unwrap();

    assert!((response.bmi - 22.86).abs() < 1e-9);
    assert_eq!(response.bmi_category, BmiCategory::NormalWeight);
    // 1673.75 * 1.55 = 2594.3125
    assert_eq!(response.tdee, 2594);
    assert!(response.calories >= CalorieTarget::FLOOR);
    assert_eq!(response.goal, "Loss");

    assert!(!response.diet_plan.is_empty());
    for (_, items) in response.diet_plan.iter() {
        assert!(items.len() <= 2);
        assert!(items.iter().all(|food| food.food_type == FoodType::Veg));
    }

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["bmi_category"], "Normal weight");
    assert!(json["calories"].is_u64());
    assert!(json["diet_plan"]["Breakfast"].is_array());
}

#[test]
fn test_fixed_diet_seed_reproduces_response() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let resources = PlannerResources::initialize(&test_planner_config(dir.path())).unwrap();

    let first = estimate(&resources, &sample_request()).unwrap();
    let second = estimate(&resources, &sample_request()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_missing_food_table_still_estimates() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_planner_config(dir.path());
    config.food_table_path = PathBuf::from(dir.path()).join("absent.csv");

    let resources = PlannerResources::initialize(&config).unwrap();
    assert!(matches!(resources.food_source, FoodTableSource::Missing { .. }));

    let response = estimate(&resources, &sample_request()).unwrap();
    assert!(response.diet_plan.is_empty());
    assert!(response.calories >= CalorieTarget::FLOOR);
}

#[test]
fn test_lazy_resources_train_on_first_request() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let resources = PlannerResources::new(&test_planner_config(dir.path())).unwrap();
    assert_eq!(
        resources.model_lifecycle().unwrap(),
        ModelLifecycle::Uninitialized
    );

    estimate(&resources, &sample_request()).unwrap();

    assert_eq!(resources.model_lifecycle().unwrap(), ModelLifecycle::Trained);
    assert!(dir.path().join("model.json").exists());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_missing_field_is_reported_with_request_id() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let resources = PlannerResources::new(&test_planner_config(dir.path())).unwrap();

    let request = EstimationRequest {
        weight: None,
        ..sample_request()
    };
    let err = estimate(&resources, &request).unwrap_err();

    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert_eq!(err.context.resource_id.as_deref(), Some("weight"));
    assert!(err.context.request_id.is_some());
    // Validation fails before the model is touched
    assert_eq!(
        resources.model_lifecycle().unwrap(),
        ModelLifecycle::Uninitialized
    );
}

#[test]
fn test_non_numeric_age_is_invalid_input() {
    let request = EstimationRequest {
        age: Some("thirty".into()),
        ..sample_request()
    };

    let err = request.validate().unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.context.resource_id.as_deref(), Some("age"));
}

#[test]
fn test_blank_and_non_positive_values_are_rejected() {
    let blank = EstimationRequest {
        gender: Some("   ".into()),
        ..sample_request()
    };
    assert_eq!(
        blank.validate().unwrap_err().code,
        ErrorCode::MissingRequiredField
    );

    let zero_height = EstimationRequest {
        height: Some("0".into()),
        ..sample_request()
    };
    assert_eq!(
        zero_height.validate().unwrap_err().code,
        ErrorCode::InvalidInput
    );
}

#[test]
fn test_unknown_goal_is_invalid_input() {
    let request = EstimationRequest {
        goal: Some("bulk".into()),
        ..sample_request()
    };

    let err = request.validate().unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.context.resource_id.as_deref(), Some("goal"));
}

#[test]
fn test_error_response_shape() {
    let request = EstimationRequest {
        age: None,
        ..sample_request()
    };
    let err = request
        .validate()
        .unwrap_err()
        .with_request_id("req-123");

    let json = serde_json::to_value(ErrorResponse::from(err)).unwrap();
    assert_eq!(json["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(json["error"]["request_id"], "req-123");
    assert!(json["error"]["message"].as_str().unwrap().contains("age"));
}

#[test]
fn test_metrics_for_needs_only_biometrics() {
    let request = EstimationRequest {
        goal: None,
        preference: None,
        ..sample_request()
    };

    let metrics = metrics_for(&request).unwrap();
    assert!((metrics.bmr - 1673.75).abs() < 1e-9);
    assert!((metrics.tdee - 2594.31).abs() < 1e-9);
}
