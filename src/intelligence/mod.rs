// ABOUTME: Intelligence module re-exports from nutriplan-intelligence crate
// ABOUTME: Adds the persisted calorie estimator, which needs filesystem access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Intelligence Module
//!
//! Re-exports the pure algorithms from `nutriplan-intelligence` and adds
//! the local calorie estimator, which owns the model artifact on disk.

pub use nutriplan_intelligence::*;

pub use nutriplan_intelligence::{config, diet_recommender, metrics_calculator, ml};

/// Trained calorie model with artifact persistence and a readiness gate
pub mod calorie_estimator;

pub use calorie_estimator::{
    CalorieEstimator, ModelArtifact, ModelLifecycle, PersistenceStatus, TrainingReport,
};
