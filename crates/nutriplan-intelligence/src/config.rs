// ABOUTME: Training configuration for the calorie regression model
// ABOUTME: Synthetic data size, seeds, split fraction, and forest hyperparameters with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Training Configuration
//!
//! Type-safe parameters for synthetic data generation and forest fitting.
//! Defaults reproduce the reference training run: 1000 rows, seed 42,
//! 80/20 split, 100 fully grown trees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric range constraint was violated
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// A value was outside what the algorithm can accept
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

/// Parameters controlling one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of synthetic rows to generate
    pub n_samples: usize,
    /// Seed for synthetic data generation
    pub data_seed: u64,
    /// Seed for the train/test shuffle
    pub split_seed: u64,
    /// Fraction of rows held out for R² scoring
    pub test_fraction: f64,
    /// Number of trees in the forest
    pub n_estimators: usize,
    /// Seed for bootstrap sampling; tree `i` uses `forest_seed + i`
    pub forest_seed: u64,
    /// Maximum tree depth (`None` grows until leaves are pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples required in each leaf
    pub min_samples_leaf: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            data_seed: 42,
            split_seed: 42,
            test_fraction: 0.2,
            n_estimators: 100,
            forest_seed: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl TrainingConfig {
    /// Use one seed for data generation, splitting, and bootstrapping
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.data_seed = seed;
        self.split_seed = seed;
        self.forest_seed = seed;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the split would leave either side empty or the
    /// forest has no trees.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ConfigError::InvalidRange(
                "test_fraction must be strictly between 0 and 1",
            ));
        }
        if self.n_samples < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "n_samples must be at least 2 to form a train/test split",
            ));
        }
        let n_test = self.test_rows();
        if n_test == 0 || n_test >= self.n_samples {
            return Err(ConfigError::InvalidRange(
                "test_fraction leaves an empty train or test split",
            ));
        }
        if self.n_estimators == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "n_estimators must be at least 1",
            ));
        }
        if self.min_samples_split < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_samples_split must be at least 2",
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_samples_leaf must be at least 1",
            ));
        }
        Ok(())
    }

    /// Number of held-out rows for this configuration
    #[must_use]
    pub fn test_rows(&self) -> usize {
        (self.n_samples as f64 * self.test_fraction).round() as usize
    }
}
