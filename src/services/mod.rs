// ABOUTME: Service layer orchestrating validation, estimation, and diet recommendation
// ABOUTME: Transport-agnostic; the CLI and tests call these functions directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

/// Per-request calorie estimation and meal planning
pub mod estimation;

pub use estimation::{
    estimate, estimate_with_rng, metrics_for, EstimationInput, EstimationRequest,
    EstimationResponse,
};
