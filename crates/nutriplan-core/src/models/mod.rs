// ABOUTME: Core data models for calorie estimation and meal planning
// ABOUTME: Re-exports biometric profile, goal, calorie target, food, and diet plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Core data models shared by every crate in the workspace.

/// Biometric inputs, derived metrics, goals, and the clamped calorie target
pub mod biometrics;

/// Food table rows, dietary preference, and diet plans
pub mod nutrition;

pub use biometrics::{
    ActivityLevel, BiometricProfile, BmiCategory, CalorieTarget, Gender, Goal, MetricResult,
};
pub use nutrition::{DietPlan, DietPreference, FoodItem, FoodType, MealSlot};
