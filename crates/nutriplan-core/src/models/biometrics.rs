// ABOUTME: Biometric profile, BMI category, goal, and calorie target definitions
// ABOUTME: Closed enums replace string dispatch; lossy parsers document their defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{activity_factors, calories};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male gender (+5 Mifflin-St Jeor constant)
    Male,
    /// Female gender (-161 Mifflin-St Jeor constant)
    Female,
}

impl Gender {
    /// Parse gender from string, case-insensitively.
    ///
    /// Only `"male"` maps to [`Gender::Male`]; every other value is treated
    /// as [`Gender::Female`], matching how the BMR formula has always
    /// treated non-male input.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        if s.eq_ignore_ascii_case("male") {
            Self::Male
        } else {
            Self::Female
        }
    }

    /// Numeric feature code used by the regression model (female 0, male 1)
    #[must_use]
    pub const fn feature_code(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }

    /// Inverse of [`Gender::feature_code`]; any non-zero code is male
    #[must_use]
    pub const fn from_feature_code(code: u8) -> Self {
        if code == 0 {
            Self::Female
        } else {
            Self::Male
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (little/no exercise)
    Sedentary,
    /// Lightly active (1-3 days/week)
    LightlyActive,
    /// Moderately active (3-5 days/week)
    ModeratelyActive,
    /// Very active (6-7 days/week)
    VeryActive,
    /// Extra active (hard training 2x/day)
    ExtraActive,
}

impl ActivityLevel {
    /// All activity levels in feature-code order
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::LightlyActive,
        Self::ModeratelyActive,
        Self::VeryActive,
        Self::ExtraActive,
    ];

    /// Parse activity level from string, case-insensitively.
    ///
    /// Unrecognized values fall back to [`ActivityLevel::Sedentary`], the
    /// baseline multiplier (1.2) and feature code (0).
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "lightly_active" => Self::LightlyActive,
            "moderately_active" => Self::ModeratelyActive,
            "very_active" => Self::VeryActive,
            "extra_active" => Self::ExtraActive,
            _ => Self::Sedentary,
        }
    }

    /// TDEE multiplier for this activity level
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => activity_factors::SEDENTARY,
            Self::LightlyActive => activity_factors::LIGHTLY_ACTIVE,
            Self::ModeratelyActive => activity_factors::MODERATELY_ACTIVE,
            Self::VeryActive => activity_factors::VERY_ACTIVE,
            Self::ExtraActive => activity_factors::EXTRA_ACTIVE,
        }
    }

    /// Numeric feature code (0-4) used by the regression model
    #[must_use]
    pub const fn feature_code(self) -> u8 {
        match self {
            Self::Sedentary => 0,
            Self::LightlyActive => 1,
            Self::ModeratelyActive => 2,
            Self::VeryActive => 3,
            Self::ExtraActive => 4,
        }
    }

    /// Inverse of [`ActivityLevel::feature_code`]
    #[must_use]
    pub fn from_feature_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Canonical snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly_active",
            Self::ModeratelyActive => "moderately_active",
            Self::VeryActive => "very_active",
            Self::ExtraActive => "extra_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated biometric inputs for a single request
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BiometricProfile {
    age: u32,
    gender: Gender,
    height_cm: f64,
    weight_kg: f64,
    activity_level: ActivityLevel,
}

impl BiometricProfile {
    /// Create a profile from already-parsed values
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if age is zero or height/weight are not
    /// finite positive numbers.
    pub fn new(
        age: u32,
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
        activity_level: ActivityLevel,
    ) -> AppResult<Self> {
        if age == 0 {
            return Err(AppError::invalid_input("Age must be a positive integer")
                .with_resource_id("age"));
        }
        if !height_cm.is_finite() || height_cm <= 0.0 {
            return Err(AppError::invalid_input("Height must be a positive number of cm")
                .with_resource_id("height"));
        }
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(AppError::invalid_input("Weight must be a positive number of kg")
                .with_resource_id("weight"));
        }

        Ok(Self {
            age,
            gender,
            height_cm,
            weight_kg,
            activity_level,
        })
    }

    /// Age in years
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Gender
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Height in centimeters
    #[must_use]
    pub const fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Weight in kilograms
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Activity level
    #[must_use]
    pub const fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }
}

/// BMI category buckets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// BMI in `[18.5, 24.9)`
    #[serde(rename = "Normal weight")]
    NormalWeight,
    /// BMI in `[25.0, 29.9)`
    Overweight,
    /// Everything else, including the `[24.9, 25.0)` gap
    Obesity,
}

impl BmiCategory {
    /// Display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obesity => "Obesity",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formula-derived metrics for one profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricResult {
    /// Body Mass Index, 2 decimal places
    pub bmi: f64,
    /// BMI bucket
    pub bmi_category: BmiCategory,
    /// Basal Metabolic Rate (kcal/day), 2 decimal places
    pub bmr: f64,
    /// Total Daily Energy Expenditure (kcal/day), 2 decimal places
    pub tdee: f64,
}

/// Caloric objective stated by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Weight loss (-500 kcal)
    Loss,
    /// Maintenance (no offset)
    Maintain,
    /// Weight gain (+500 kcal)
    Gain,
}

impl Goal {
    /// Fixed caloric offset applied to the predicted need
    #[must_use]
    pub const fn offset_kcal(self) -> f64 {
        match self {
            Self::Loss => calories::LOSS_OFFSET_KCAL,
            Self::Maintain => 0.0,
            Self::Gain => calories::GAIN_OFFSET_KCAL,
        }
    }

    /// Capitalized display label ("Loss", "Maintain", "Gain")
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loss => "Loss",
            Self::Maintain => "Maintain",
            Self::Gain => "Gain",
        }
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loss" => Ok(Self::Loss),
            "maintain" => Ok(Self::Maintain),
            "gain" => Ok(Self::Gain),
            other => Err(AppError::invalid_input(format!(
                "Invalid goal '{other}'. Must be: loss, maintain, gain"
            ))
            .with_resource_id("goal")),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final daily calorie target: always an integer and never below the floor
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct CalorieTarget(u32);

impl CalorieTarget {
    /// The hard floor every target respects
    pub const FLOOR: Self = Self(calories::MINIMUM_DAILY_KCAL);

    /// Apply the goal offset to a raw prediction, truncate toward zero, then
    /// clamp to the floor.
    #[must_use]
    pub fn from_prediction(raw_kcal: f64, goal: Goal) -> Self {
        // `as` saturates and maps NaN to 0, which the floor then absorbs
        let adjusted = (raw_kcal + goal.offset_kcal()).trunc() as i64;
        let floor = i64::from(calories::MINIMUM_DAILY_KCAL);
        let clamped = adjusted.max(floor);
        Self(u32::try_from(clamped).unwrap_or(u32::MAX))
    }

    /// Checked constructor for an explicit target
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when `kcal` is below the floor
    pub fn new(kcal: u32) -> AppResult<Self> {
        if kcal < calories::MINIMUM_DAILY_KCAL {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                format!(
                    "Calorie target {kcal} is below the {} kcal floor",
                    calories::MINIMUM_DAILY_KCAL
                ),
            ));
        }
        Ok(Self(kcal))
    }

    /// Target in kcal/day
    #[must_use]
    pub const fn kcal(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CalorieTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kcal", self.0)
    }
}
