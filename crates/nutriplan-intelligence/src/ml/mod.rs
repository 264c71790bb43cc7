// ABOUTME: Regression learning primitives for the calorie model
// ABOUTME: Synthetic dataset generation, CART regression trees, random forest, and scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Machine Learning Module
//!
//! A small, dependency-light regression stack sized for the calorie model:
//!
//! - [`dataset`]: feature encoding, seeded synthetic data, train/test split
//! - [`regression_tree`]: CART regression tree with the MSE criterion
//! - [`random_forest`]: bootstrap-aggregated trees fitted in parallel
//! - [`scoring`]: R² and mean absolute error
//!
//! Everything here is deterministic for a given seed.

use thiserror::Error;

/// Feature encoding and synthetic data generation
pub mod dataset;
/// Bagged ensemble of regression trees
pub mod random_forest;
/// Single CART regression tree
pub mod regression_tree;
/// Regression quality metrics
pub mod scoring;

pub use dataset::{
    encode_features, generate_synthetic_data, train_test_split, Dataset, FeatureRow,
    FEATURE_COUNT,
};
pub use random_forest::{ForestParams, RandomForestRegressor};
pub use regression_tree::{RegressionNode, RegressionTree, TreeParams};
pub use scoring::{mean_absolute_error, r2_score};

/// Errors raised while fitting or querying a model
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MlError {
    /// Feature and target counts differ
    #[error("Feature rows ({features}) and targets ({targets}) must have the same length")]
    ShapeMismatch {
        /// Number of feature rows
        features: usize,
        /// Number of target values
        targets: usize,
    },

    /// Fitting was attempted on zero rows
    #[error("Cannot fit a model with zero samples")]
    EmptyDataset,

    /// Prediction was attempted before fitting
    #[error("Model has not been fitted")]
    NotFitted,

    /// A row has the wrong number of features
    #[error("Expected {expected} features, got {actual}")]
    FeatureCountMismatch {
        /// Features seen at fit time
        expected: usize,
        /// Features in the offending row
        actual: usize,
    },

    /// A training index pointed past the end of the data
    #[error("Row index {index} is out of bounds for {len} rows")]
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Number of rows available
        len: usize,
    },

    /// A split fraction left one side empty
    #[error("Invalid split: {0}")]
    InvalidSplit(&'static str),

    /// A split node tests a feature the model was not fitted on
    #[error("Split on feature {feature} but the model has {n_features} features")]
    InvalidSplitFeature {
        /// Feature index stored in the node
        feature: usize,
        /// Feature width of the model
        n_features: usize,
    },
}
