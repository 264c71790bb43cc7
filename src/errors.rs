// ABOUTME: Error handling re-exports from the nutriplan-core crate
// ABOUTME: Keeps crate::errors paths stable for binaries and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Unified Error Handling System
//!
//! `AppError` and `ErrorCode` live in `nutriplan-core` so the intelligence
//! crate can share them. This module re-exports them and adds conversions
//! for error types only the main crate sees.

pub use nutriplan_core::errors::*;

use nutriplan_intelligence::{ConfigError, MlError};

/// Convert a fitting or prediction failure into `ModelUnavailable`
#[must_use]
pub fn from_ml_error(error: &MlError) -> AppError {
    AppError::model_unavailable(error.to_string())
}

/// Convert a training configuration failure into `ConfigInvalid`
#[must_use]
pub fn from_config_error(error: &ConfigError) -> AppError {
    AppError::new(ErrorCode::ConfigInvalid, error.to_string())
}

/// Convert a CSV failure into `InvalidFormat` naming the file
#[must_use]
pub fn from_csv_error(error: csv::Error, path: &std::path::Path) -> AppError {
    AppError::invalid_format(format!(
        "Malformed food table {}: {error}",
        path.display()
    ))
    .with_resource_id(path.display().to_string())
    .with_source(error)
}
