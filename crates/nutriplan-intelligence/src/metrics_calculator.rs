// ABOUTME: Body metric formulas: BMI, BMI category, Mifflin-St Jeor BMR, and TDEE
// ABOUTME: Pure functions rounding to two decimals; shared with synthetic label generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Metric Calculator Module
//!
//! Deterministic formulas converting a biometric profile to BMI, BMR and
//! TDEE. The unrounded Mifflin-St Jeor helper is also used to label the
//! synthetic training data, so the regression model learns the same
//! relationship these functions compute.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//! - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology.

use nutriplan_core::constants::{bmi_thresholds, mifflin_st_jeor};
use nutriplan_core::models::{ActivityLevel, BiometricProfile, BmiCategory, Gender, MetricResult};

/// Round to two decimal places, half away from zero
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculate Body Mass Index
///
/// Formula: BMI = `weight_kg` / (`height_cm` / 100)^2, rounded to 2 decimals.
///
/// A zero height yields 0 rather than an infinite or NaN value.
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm == 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

/// Bucket a BMI value
///
/// Thresholds: `< 18.5` Underweight, `[18.5, 24.9)` Normal weight,
/// `[25, 29.9)` Overweight, otherwise Obesity. Values in `[24.9, 25)`
/// therefore land in Obesity.
#[must_use]
pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < bmi_thresholds::UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < bmi_thresholds::NORMAL_BELOW {
        BmiCategory::NormalWeight
    } else if (bmi_thresholds::OVERWEIGHT_FROM..bmi_thresholds::OVERWEIGHT_BELOW).contains(&bmi) {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obesity
    }
}

/// Unrounded Mifflin-St Jeor BMR
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_constant`
/// - Men: +5
/// - Women: -161
#[must_use]
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: f64, gender: Gender) -> f64 {
    let gender_constant = match gender {
        Gender::Male => mifflin_st_jeor::MALE_CONSTANT,
        Gender::Female => mifflin_st_jeor::FEMALE_CONSTANT,
    };

    mifflin_st_jeor::WEIGHT_COEF * weight_kg
        + mifflin_st_jeor::HEIGHT_COEF * height_cm
        + mifflin_st_jeor::AGE_COEF * age
        + gender_constant
}

/// Calculate Basal Metabolic Rate (Mifflin-St Jeor), rounded to 2 decimals
#[must_use]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    round2(mifflin_st_jeor(weight_kg, height_cm, f64::from(age), gender))
}

/// Calculate Total Daily Energy Expenditure, rounded to 2 decimals
///
/// Formula: TDEE = BMR x activity multiplier
#[must_use]
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    round2(bmr * activity_level.multiplier())
}

/// Run every formula for one profile
#[must_use]
pub fn calculate_metrics(profile: &BiometricProfile) -> MetricResult {
    let bmi = calculate_bmi(profile.weight_kg(), profile.height_cm());
    let bmr = calculate_bmr(
        profile.weight_kg(),
        profile.height_cm(),
        profile.age(),
        profile.gender(),
    );

    MetricResult {
        bmi,
        bmi_category: bmi_category(bmi),
        bmr,
        tdee: calculate_tdee(bmr, profile.activity_level()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_bmi_zero_height_is_zero() {
        assert!(calculate_bmi(70.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmi_rounds_to_two_decimals() {
        // 70 / 1.75^2 = 22.857142...
        assert!((calculate_bmi(70.0, 175.0) - 22.86).abs() < 1e-9);
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert!((round2(1.005_000_1) - 1.01).abs() < 1e-9);
        assert!((round2(-2.345_000_1) + 2.35).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_metrics_for_profile() {
        let profile =
            BiometricProfile::new(30, Gender::Male, 175.0, 70.0, ActivityLevel::Sedentary)
                .unwrap();
        let metrics = calculate_metrics(&profile);

        assert_eq!(metrics.bmi_category, BmiCategory::NormalWeight);
        assert!((metrics.bmr - 1673.75).abs() < 1e-9);
        assert!((metrics.tdee - 2008.5).abs() < 1e-9);
    }
}
