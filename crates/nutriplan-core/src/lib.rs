// ABOUTME: Core types and constants for the Nutriplan calorie estimation platform
// ABOUTME: Foundation crate with error handling, biometric models, and physiological constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

#![deny(unsafe_code)]

//! # Nutriplan Core
//!
//! Foundation crate providing shared types and constants for Nutriplan.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Physiological coefficients, meal shares, and calorie limits
//! - **models**: Biometric profiles, goals, food items, and diet plans

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`BiometricProfile`, `FoodItem`, `DietPlan`, etc.)
pub mod models;
