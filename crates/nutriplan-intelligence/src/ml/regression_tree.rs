// ABOUTME: CART regression tree using the mean squared error split criterion
// ABOUTME: Sort-and-sweep split search with midpoint thresholds; serializable node structure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Regression tree
//!
//! Each internal node holds `feature <= threshold`; rows satisfying the test
//! go left. Leaves predict the mean target of the rows that reached them.
//! Rows may appear more than once in the training index list (bootstrap),
//! in which case they count with that multiplicity.

use serde::{Deserialize, Serialize};

use super::MlError;

/// Growth limits for a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth; `None` grows until leaves are pure or too small
    pub max_depth: Option<usize>,
    /// Minimum rows at a node before splitting is considered
    pub min_samples_split: usize,
    /// Minimum rows on each side of a split
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// Node of a fitted tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionNode {
    /// Terminal node
    Leaf {
        /// Mean target of the rows in this leaf
        value: f64,
        /// Rows that reached this leaf during fitting
        n_samples: usize,
    },
    /// Internal decision node
    Split {
        /// Feature index tested
        feature: usize,
        /// Rows with `row[feature] <= threshold` go left
        threshold: f64,
        /// Subtree for rows passing the test
        left: Box<RegressionNode>,
        /// Subtree for the rest
        right: Box<RegressionNode>,
    },
}

impl RegressionNode {
    fn predict(&self, row: &[f64]) -> Result<f64, MlError> {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { value, .. } => return Ok(*value),
                Self::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).ok_or(MlError::InvalidSplitFeature {
                        feature: *feature,
                        n_features: row.len(),
                    })?;
                    node = if *value <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Check that every split tests a feature below `n_features`
    fn check_features(&self, n_features: usize) -> Result<(), MlError> {
        match self {
            Self::Leaf { .. } => Ok(()),
            Self::Split {
                feature,
                left,
                right,
                ..
            } => {
                if *feature >= n_features {
                    return Err(MlError::InvalidSplitFeature {
                        feature: *feature,
                        n_features,
                    });
                }
                left.check_features(n_features)?;
                right.check_features(n_features)
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn n_leaves(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

/// Best split found for a node
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    sse: f64,
}

/// CART regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    params: TreeParams,
    n_features: usize,
    root: Option<RegressionNode>,
}

impl RegressionTree {
    /// Unfitted tree with the given limits
    #[must_use]
    pub const fn new(params: TreeParams) -> Self {
        Self {
            params,
            n_features: 0,
            root: None,
        }
    }

    /// Fit on every row
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, mismatched lengths, or rows of
    /// unequal width.
    pub fn fit<R: AsRef<[f64]>>(&mut self, x: &[R], y: &[f64]) -> Result<(), MlError> {
        let indices: Vec<usize> = (0..x.len()).collect();
        self.fit_on_indices(x, y, indices)
    }

    /// Fit on the rows named by `indices`; duplicates are allowed
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, mismatched lengths, or rows of
    /// unequal width.
    pub fn fit_on_indices<R: AsRef<[f64]>>(
        &mut self,
        x: &[R],
        y: &[f64],
        mut indices: Vec<usize>,
    ) -> Result<(), MlError> {
        if x.len() != y.len() {
            return Err(MlError::ShapeMismatch {
                features: x.len(),
                targets: y.len(),
            });
        }
        if x.is_empty() || indices.is_empty() {
            return Err(MlError::EmptyDataset);
        }

        if let Some(&index) = indices.iter().find(|&&i| i >= x.len()) {
            return Err(MlError::IndexOutOfBounds {
                index,
                len: x.len(),
            });
        }

        let n_features = x[0].as_ref().len();
        if let Some(bad) = x.iter().find(|row| row.as_ref().len() != n_features) {
            return Err(MlError::FeatureCountMismatch {
                expected: n_features,
                actual: bad.as_ref().len(),
            });
        }

        self.n_features = n_features;
        self.root = Some(self.build(x, y, &mut indices, 0));
        Ok(())
    }

    /// Predict one row
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before fitting and `FeatureCountMismatch` for a
    /// row of the wrong width.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, MlError> {
        let root = self.root.as_ref().ok_or(MlError::NotFitted)?;
        if row.len() != self.n_features {
            return Err(MlError::FeatureCountMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        root.predict(row)
    }

    /// Check a tree that was deserialized rather than fitted
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` for a tree without a root and
    /// `InvalidSplitFeature` when a split tests a feature at or beyond
    /// [`Self::n_features`].
    pub fn check_structure(&self) -> Result<(), MlError> {
        let root = self.root.as_ref().ok_or(MlError::NotFitted)?;
        root.check_features(self.n_features)
    }

    /// Whether the tree has been fitted
    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Feature width seen at fit time
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Root node of the fitted tree
    #[must_use]
    pub const fn root(&self) -> Option<&RegressionNode> {
        self.root.as_ref()
    }

    /// Depth of the fitted tree (0 for a single leaf or an unfitted tree)
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, RegressionNode::depth)
    }

    /// Leaf count of the fitted tree
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, RegressionNode::n_leaves)
    }

    fn build<R: AsRef<[f64]>>(
        &self,
        x: &[R],
        y: &[f64],
        indices: &mut [usize],
        depth: usize,
    ) -> RegressionNode {
        let n = indices.len();
        let mean = indices.iter().map(|&i| y[i]).sum::<f64>() / n as f64;
        let node_sse: f64 = indices.iter().map(|&i| (y[i] - mean).powi(2)).sum();

        let leaf = RegressionNode::Leaf {
            value: mean,
            n_samples: n,
        };

        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        if depth_reached || n < self.params.min_samples_split || node_sse <= 0.0 {
            return leaf;
        }

        let Some(best) = self.best_split(x, y, indices) else {
            return leaf;
        };
        if best.sse >= node_sse {
            return leaf;
        }

        let split_at = partition(indices, |i| x[i].as_ref()[best.feature] <= best.threshold);
        let (left_idx, right_idx) = indices.split_at_mut(split_at);

        let left = self.build(x, y, left_idx, depth + 1);
        let right = self.build(x, y, right_idx, depth + 1);

        RegressionNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Lowest-SSE split over every feature, scanning sorted values once per
    /// feature with running sums. Ties keep the earliest candidate.
    fn best_split<R: AsRef<[f64]>>(
        &self,
        x: &[R],
        y: &[f64],
        indices: &[usize],
    ) -> Option<SplitCandidate> {
        let n = indices.len();
        let min_leaf = self.params.min_samples_leaf;
        let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
        let total_sq: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();

        let mut best: Option<SplitCandidate> = None;
        let mut order = indices.to_vec();

        for feature in 0..self.n_features {
            let value = |i: usize| x[i].as_ref()[feature];
            order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;

            for (k, pair) in order.windows(2).enumerate() {
                let yi = y[pair[0]];
                left_sum += yi;
                left_sq += yi * yi;

                let current = value(pair[0]);
                let next = value(pair[1]);
                if current >= next {
                    continue;
                }

                let n_left = k + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let sse = (left_sq - left_sum * left_sum / n_left as f64)
                    + (right_sq - right_sum * right_sum / n_right as f64);

                if best.as_ref().is_none_or(|b| sse < b.sse) {
                    let mut threshold = current / 2.0 + next / 2.0;
                    // Adjacent floats can round the midpoint up to `next`
                    if threshold >= next {
                        threshold = current;
                    }
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        sse,
                    });
                }
            }
        }

        best
    }
}

/// Stable partition: rows satisfying `pred` move to the front, returning how many did
fn partition(indices: &mut [usize], pred: impl Fn(usize) -> bool) -> usize {
    let (left, right): (Vec<usize>, Vec<usize>) = indices.iter().partition(|&&i| pred(i));
    let split = left.len();
    indices[..split].copy_from_slice(&left);
    indices[split..].copy_from_slice(&right);
    split
}
