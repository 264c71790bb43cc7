// ABOUTME: Main library entry point for the Nutriplan calorie estimation service
// ABOUTME: Wires metric formulas, the trained calorie model, and diet recommendation together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

#![deny(unsafe_code)]

//! # Nutriplan
//!
//! Estimates daily calorie needs from biometrics and suggests a simple meal
//! plan. A formula path (BMI, Mifflin-St Jeor BMR, TDEE) runs alongside a
//! random-forest model trained on synthetic data; the model's prediction is
//! adjusted for the user's goal and clamped to a 1200 kcal floor before
//! foods are sampled for each meal.
//!
//! ## Architecture
//!
//! - **Config**: environment-only settings (`PlannerConfig`)
//! - **Intelligence**: formulas, forest, and the persisted `CalorieEstimator`
//! - **External**: food table loading
//! - **Resources**: the shared model and food table, initialized once
//! - **Services**: request validation and orchestration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutriplan::config::PlannerConfig;
//! use nutriplan::resources::PlannerResources;
//! use nutriplan::services::estimation::{estimate, EstimationRequest};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = PlannerConfig::from_env()?;
//!     let resources = PlannerResources::initialize(&config)?;
//!
//!     let request = EstimationRequest {
//!         age: Some("30".into()),
//!         gender: Some("male".into()),
//!         height: Some("175".into()),
//!         weight: Some("70".into()),
//!         activity: Some("sedentary".into()),
//!         goal: Some("maintain".into()),
//!         preference: Some("veg".into()),
//!     };
//!     let response = estimate(&resources, &request)?;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// File-backed inputs such as the food table
pub mod external;

/// Calorie intelligence: formulas, forest, and model lifecycle
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Shared process-wide resources
pub mod resources;

/// Request orchestration
pub mod services;

pub use nutriplan_core::models;
