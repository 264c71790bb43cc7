// ABOUTME: Physiological coefficients, goal offsets, and meal distribution constants
// ABOUTME: Single source of truth for every number the calorie pipeline depends on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Application constants organized by domain.

/// Mifflin-St Jeor equation coefficients
///
/// Reference: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
pub mod mifflin_st_jeor {
    /// Weight coefficient (per kg)
    pub const WEIGHT_COEF: f64 = 10.0;
    /// Height coefficient (per cm)
    pub const HEIGHT_COEF: f64 = 6.25;
    /// Age coefficient (per year)
    pub const AGE_COEF: f64 = -5.0;
    /// Male constant
    pub const MALE_CONSTANT: f64 = 5.0;
    /// Female constant
    pub const FEMALE_CONSTANT: f64 = -161.0;
}

/// Activity factor multipliers for TDEE, indexed by activity code 0..=4
///
/// Reference: `McArdle` et al. (2010) - Exercise Physiology
pub mod activity_factors {
    /// Sedentary (little/no exercise)
    pub const SEDENTARY: f64 = 1.2;
    /// Lightly active (1-3 days/week)
    pub const LIGHTLY_ACTIVE: f64 = 1.375;
    /// Moderately active (3-5 days/week)
    pub const MODERATELY_ACTIVE: f64 = 1.55;
    /// Very active (6-7 days/week)
    pub const VERY_ACTIVE: f64 = 1.725;
    /// Extra active (hard training 2x/day)
    pub const EXTRA_ACTIVE: f64 = 1.9;
}

/// BMI category thresholds
///
/// The Normal upper bound (24.9) and the Overweight lower bound (25.0) leave
/// a gap that falls through to Obesity. Kept as-is pending product review.
pub mod bmi_thresholds {
    /// Below this is Underweight
    pub const UNDERWEIGHT_BELOW: f64 = 18.5;
    /// Normal weight is `[18.5, 24.9)`
    pub const NORMAL_BELOW: f64 = 24.9;
    /// Overweight starts here
    pub const OVERWEIGHT_FROM: f64 = 25.0;
    /// Overweight is `[25.0, 29.9)`
    pub const OVERWEIGHT_BELOW: f64 = 29.9;
}

/// Calorie target limits and goal offsets (kcal/day)
pub mod calories {
    /// Hard floor for any recommended daily calorie target
    pub const MINIMUM_DAILY_KCAL: u32 = 1200;
    /// Offset applied for a weight-loss goal
    pub const LOSS_OFFSET_KCAL: f64 = -500.0;
    /// Offset applied for a weight-gain goal
    pub const GAIN_OFFSET_KCAL: f64 = 500.0;
}

/// Share of the daily calorie target assigned to each meal slot
pub mod meal_shares {
    /// Breakfast share
    pub const BREAKFAST: f64 = 0.25;
    /// Lunch share
    pub const LUNCH: f64 = 0.35;
    /// Snacks share
    pub const SNACKS: f64 = 0.10;
    /// Dinner share
    pub const DINNER: f64 = 0.30;
    /// Maximum items sampled per meal slot
    pub const ITEMS_PER_SLOT: usize = 2;
}

/// Service identity used in logs
pub mod service_names {
    /// Library / CLI service name
    pub const NUTRIPLAN: &str = "nutriplan";
}
