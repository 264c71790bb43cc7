// ABOUTME: Estimation service: validates raw inputs, runs formulas and the model, and builds a diet plan
// ABOUTME: Goal offset and the 1200 kcal floor are applied here before meal selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Estimation service
//!
//! One request flows through four steps: BMI and category, formula BMR and
//! TDEE, model prediction adjusted for the goal and clamped to the floor,
//! and a diet plan for the clamped target. Any failure aborts the request
//! with no partial result.

use std::str::FromStr;

use nutriplan_core::models::{
    ActivityLevel, BiometricProfile, BmiCategory, CalorieTarget, DietPlan, DietPreference, Gender,
    Goal, MetricResult,
};
use nutriplan_intelligence::calculate_metrics;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::resources::PlannerResources;

/// Raw request values as submitted; every field is required
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationRequest {
    /// Whole years
    pub age: Option<String>,
    /// "male" selects the male formula; anything else the female one
    pub gender: Option<String>,
    /// Centimetres
    pub height: Option<String>,
    /// Kilograms
    pub weight: Option<String>,
    /// Activity level name; unrecognized values mean sedentary
    pub activity: Option<String>,
    /// loss, maintain, or gain
    pub goal: Option<String>,
    /// veg or non-veg; anything else applies no filter
    pub preference: Option<String>,
}

/// Validated request
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationInput {
    /// Biometrics
    pub profile: BiometricProfile,
    /// Weight goal
    pub goal: Goal,
    /// Dietary preference
    pub preference: DietPreference,
}

/// Estimation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationResponse {
    /// Body mass index, two decimals
    pub bmi: f64,
    /// BMI bucket
    pub bmi_category: BmiCategory,
    /// Formula TDEE, truncated
    pub tdee: i64,
    /// Model prediction after goal adjustment and the floor
    pub calories: CalorieTarget,
    /// Capitalized goal
    pub goal: String,
    /// Selected foods per meal slot
    pub diet_plan: DietPlan,
}

fn required<'a>(value: Option<&'a String>, field: &str) -> AppResult<&'a str> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(field))
}

fn parse_field<T: FromStr>(value: Option<&String>, field: &str, expected: &str) -> AppResult<T> {
    let raw = required(value, field)?;
    raw.parse::<T>().map_err(|_| {
        AppError::invalid_input(format!("{field} must be {expected}, got '{raw}'"))
            .with_resource_id(field)
    })
}

impl EstimationRequest {
    /// Validate and convert every field
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for an absent or blank field and
    /// `InvalidInput` for an unparseable or out-of-range value
    pub fn validate(&self) -> AppResult<EstimationInput> {
        let profile = self.profile()?;
        let goal = Goal::from_str(required(self.goal.as_ref(), "goal")?)?;
        let preference =
            DietPreference::from_str_lossy(required(self.preference.as_ref(), "preference")?);

        Ok(EstimationInput {
            profile,
            goal,
            preference,
        })
    }

    /// Validate only the biometric fields
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::validate`], limited to the biometric fields
    pub fn profile(&self) -> AppResult<BiometricProfile> {
        let age: u32 = parse_field(self.age.as_ref(), "age", "a whole number of years")?;
        let gender = Gender::from_str_lossy(required(self.gender.as_ref(), "gender")?);
        let height_cm: f64 = parse_field(self.height.as_ref(), "height", "a number of centimetres")?;
        let weight_kg: f64 = parse_field(self.weight.as_ref(), "weight", "a number of kilograms")?;
        let activity = ActivityLevel::from_str_lossy(required(self.activity.as_ref(), "activity")?);

        BiometricProfile::new(age, gender, height_cm, weight_kg, activity)
    }
}

/// Formula-only metrics for a request's biometric fields
///
/// # Errors
///
/// Returns a validation error for missing or malformed biometrics
pub fn metrics_for(request: &EstimationRequest) -> AppResult<MetricResult> {
    Ok(calculate_metrics(&request.profile()?))
}

/// Run a full estimation with the configured diet random source
///
/// # Errors
///
/// Returns a validation error for bad input or `ModelUnavailable` if the
/// model cannot be loaded or trained
pub fn estimate(
    resources: &PlannerResources,
    request: &EstimationRequest,
) -> AppResult<EstimationResponse> {
    let mut rng = resources.diet_rng();
    estimate_with_rng(resources, request, &mut rng)
}

/// Run a full estimation drawing diet samples from `rng`
///
/// # Errors
///
/// Same conditions as [`estimate`]
pub fn estimate_with_rng<R: Rng + ?Sized>(
    resources: &PlannerResources,
    request: &EstimationRequest,
    rng: &mut R,
) -> AppResult<EstimationResponse> {
    let request_id = Uuid::new_v4();
    let span = info_span!("estimate", %request_id);
    let _guard = span.enter();

    run(resources, request, rng).map_err(|e| e.with_request_id(request_id.to_string()))
}

fn run<R: Rng + ?Sized>(
    resources: &PlannerResources,
    request: &EstimationRequest,
    rng: &mut R,
) -> AppResult<EstimationResponse> {
    let input = request.validate()?;
    let metrics = calculate_metrics(&input.profile);
    debug!(
        bmi = metrics.bmi,
        bmr = metrics.bmr,
        tdee = metrics.tdee,
        "Computed formula metrics"
    );

    let raw_prediction = resources.estimator.predict_profile(&input.profile)?;
    let calories = CalorieTarget::from_prediction(raw_prediction, input.goal);
    info!(
        raw_prediction,
        goal = input.goal.label(),
        calories = calories.kcal(),
        "Estimated daily calories"
    );

    let diet_plan = resources
        .recommender
        .recommend_diet(calories, input.preference, rng);

    Ok(EstimationResponse {
        bmi: metrics.bmi,
        bmi_category: metrics.bmi_category,
        tdee: metrics.tdee.trunc() as i64,
        calories,
        goal: input.goal.label().to_owned(),
        diet_plan,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use nutriplan_core::errors::ErrorCode;

    use super::*;

    fn request() -> EstimationRequest {
        EstimationRequest {
            age: Some("30".into()),
            gender: Some("male".into()),
            height: Some("175".into()),
            weight: Some("70".into()),
            activity: Some("sedentary".into()),
            goal: Some("maintain".into()),
            preference: Some("veg".into()),
        }
    }

    #[test]
    fn test_valid_request() {
        let input = request().validate().unwrap();
        assert_eq!(input.goal, Goal::Maintain);
        assert_eq!(input.preference, DietPreference::Veg);
        assert_eq!(input.profile.age(), 30);
    }

    #[test]
    fn test_missing_field() {
        let req = EstimationRequest {
            weight: None,
            ..request()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert_eq!(err.context.resource_id.as_deref(), Some("weight"));
    }

    #[test]
    fn test_unparseable_age() {
        let req = EstimationRequest {
            age: Some("thirty".into()),
            ..request()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.context.resource_id.as_deref(), Some("age"));
    }

    #[test]
    fn test_unknown_goal_is_rejected() {
        let req = EstimationRequest {
            goal: Some("bulk".into()),
            ..request()
        };
        assert_eq!(req.validate().unwrap_err().code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_metrics_for_request() {
        let metrics = metrics_for(&request()).unwrap();
        assert!((metrics.bmr - 1673.75).abs() < 1e-9);
        assert!((metrics.tdee - 2008.5).abs() < 1e-9);
    }
}
