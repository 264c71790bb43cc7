// ABOUTME: Random forest regressor built from bootstrap-sampled CART trees
// ABOUTME: Trees are fitted in parallel with per-tree seeds so results do not depend on thread count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Random Forest Regressor
//!
//! Tree `i` draws a bootstrap sample (n rows with replacement) from a
//! `ChaCha8Rng` seeded with `random_state + i`, then grows a CART tree on
//! it. Trees are fitted on the rayon pool and collected in index order.
//! The forest predicts the mean of its trees.

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::regression_tree::{RegressionTree, TreeParams};
use super::scoring::r2_score;
use super::MlError;

/// Forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees
    pub n_estimators: usize,
    /// Base seed for bootstrap sampling
    pub random_state: u64,
    /// Per-tree growth limits
    pub tree: TreeParams,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            random_state: 42,
            tree: TreeParams::default(),
        }
    }
}

/// Draw `n_samples` row indices with replacement
fn bootstrap_sample(n_samples: usize, seed: u64) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n_samples).map(|_| dist.sample(&mut rng)).collect()
}

/// Bagged ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    params: ForestParams,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    /// Unfitted forest
    #[must_use]
    pub const fn new(params: ForestParams) -> Self {
        Self {
            params,
            n_features: 0,
            trees: Vec::new(),
        }
    }

    /// Fit every tree on its own bootstrap sample
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, mismatched lengths, rows of unequal
    /// width, or a forest configured with zero trees.
    pub fn fit<R: AsRef<[f64]> + Sync>(&mut self, x: &[R], y: &[f64]) -> Result<(), MlError> {
        if x.len() != y.len() {
            return Err(MlError::ShapeMismatch {
                features: x.len(),
                targets: y.len(),
            });
        }
        if x.is_empty() || self.params.n_estimators == 0 {
            return Err(MlError::EmptyDataset);
        }

        let n_samples = x.len();
        let params = self.params;

        let trees = (0..params.n_estimators)
            .into_par_iter()
            .map(|i| -> Result<RegressionTree, MlError> {
                let seed = params.random_state.wrapping_add(i as u64);
                let indices = bootstrap_sample(n_samples, seed);
                let mut tree = RegressionTree::new(params.tree);
                tree.fit_on_indices(x, y, indices)?;
                Ok(tree)
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.n_features = x[0].as_ref().len();
        self.trees = trees;

        debug!(
            n_estimators = params.n_estimators,
            n_samples,
            mean_depth = self.trees.iter().map(RegressionTree::depth).sum::<usize>()
                / self.trees.len().max(1),
            "Fitted random forest"
        );

        Ok(())
    }

    /// Predict one row as the mean of every tree's prediction
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before fitting and `FeatureCountMismatch` for a
    /// row of the wrong width.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, MlError> {
        if self.trees.is_empty() {
            return Err(MlError::NotFitted);
        }
        if row.len() != self.n_features {
            return Err(MlError::FeatureCountMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict_row(row)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    /// Predict many rows
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::predict_row`]
    pub fn predict<R: AsRef<[f64]>>(&self, x: &[R]) -> Result<Vec<f64>, MlError> {
        x.iter().map(|row| self.predict_row(row.as_ref())).collect()
    }

    /// R² of the forest's predictions against `y`
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::predict_row`]
    pub fn score<R: AsRef<[f64]>>(&self, x: &[R], y: &[f64]) -> Result<f64, MlError> {
        let predictions = self.predict(x)?;
        Ok(r2_score(y, &predictions))
    }

    /// Hyperparameters used for fitting
    #[must_use]
    pub const fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Fitted trees in seed order
    #[must_use]
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Feature width seen at fit time
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Whether the forest has been fitted
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Check a forest that was deserialized rather than fitted, so that
    /// prediction cannot index past a row
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` for an empty forest or a rootless tree,
    /// `FeatureCountMismatch` when a tree's width differs from the forest's,
    /// and `InvalidSplitFeature` for a split on an unknown feature.
    pub fn check_structure(&self) -> Result<(), MlError> {
        if self.trees.is_empty() {
            return Err(MlError::NotFitted);
        }
        for tree in &self.trees {
            if tree.n_features() != self.n_features {
                return Err(MlError::FeatureCountMismatch {
                    expected: self.n_features,
                    actual: tree.n_features(),
                });
            }
            tree.check_structure()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn linear_data() -> (Vec<[f64; 2]>, Vec<f64>) {
        let x: Vec<[f64; 2]> = (0..60)
            .map(|i| [f64::from(i), f64::from(i % 7)])
            .collect();
        let y: Vec<f64> = x.iter().map(|r| 3.0 * r[0] + r[1]).collect();
        (x, y)
    }

    fn small_params() -> ForestParams {
        ForestParams {
            n_estimators: 10,
            ..ForestParams::default()
        }
    }

    #[test]
    fn test_bootstrap_is_seeded() {
        assert_eq!(bootstrap_sample(50, 7), bootstrap_sample(50, 7));
        assert_ne!(bootstrap_sample(50, 7), bootstrap_sample(50, 8));
        assert!(bootstrap_sample(50, 7).iter().all(|&i| i < 50));
    }

    #[test]
    fn test_forest_fits_and_scores_well() {
        let (x, y) = linear_data();
        let mut forest = RandomForestRegressor::new(small_params());
        forest.fit(&x, &y).unwrap();

        assert_eq!(forest.trees().len(), 10);
        assert!(forest.score(&x, &y).unwrap() > 0.95);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = linear_data();
        let mut first = RandomForestRegressor::new(small_params());
        let mut second = RandomForestRegressor::new(small_params());
        first.fit(&x, &y).unwrap();
        second.fit(&x, &y).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_prediction_is_mean_of_trees() {
        let (x, y) = linear_data();
        let mut forest = RandomForestRegressor::new(small_params());
        forest.fit(&x, &y).unwrap();

        let row = [12.5, 3.0];
        let mean = forest
            .trees()
            .iter()
            .map(|t| t.predict_row(&row).unwrap())
            .sum::<f64>()
            / 10.0;
        assert!((forest.predict_row(&row).unwrap() - mean).abs() < 1e-9);
    }

    #[test]
    fn test_serde_round_trip_preserves_predictions() {
        let (x, y) = linear_data();
        let mut forest = RandomForestRegressor::new(small_params());
        forest.fit(&x, &y).unwrap();

        let json = serde_json::to_string(&forest).unwrap();
        let restored: RandomForestRegressor = serde_json::from_str(&json).unwrap();

        for row in &x {
            assert_eq!(
                forest.predict_row(row).unwrap().to_bits(),
                restored.predict_row(row).unwrap().to_bits()
            );
        }
    }

    #[test]
    fn test_unfitted_forest_errors() {
        let forest = RandomForestRegressor::new(small_params());
        assert_eq!(forest.predict_row(&[1.0, 2.0]), Err(MlError::NotFitted));
        assert_eq!(forest.check_structure(), Err(MlError::NotFitted));
    }

    #[test]
    fn test_fitted_forest_passes_structure_check() {
        let (x, y) = linear_data();
        let mut forest = RandomForestRegressor::new(small_params());
        forest.fit(&x, &y).unwrap();

        assert_eq!(forest.check_structure(), Ok(()));
    }
}
