// ABOUTME: Configuration management module for planner settings
// ABOUTME: Environment-only configuration for artifact paths, training parameters, and diet seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Configuration module for Nutriplan
//!
//! - **Environment**: `PlannerConfig` loaded from `NUTRIPLAN_*` variables
//! - **Training**: `TrainingConfig` from the intelligence crate, validated on load

/// Environment configuration
pub mod environment;

pub use environment::PlannerConfig;
pub use nutriplan_intelligence::config::{ConfigError, TrainingConfig};
