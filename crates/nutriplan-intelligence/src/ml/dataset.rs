// ABOUTME: Feature encoding, seeded synthetic calorie data, and train/test splitting
// ABOUTME: Labels are Mifflin-St Jeor TDEE plus Gaussian noise so a model can approximate the formula
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Synthetic training data for the calorie model.
//!
//! Features per row: age, gender code (female 0 / male 1), height (cm),
//! weight (kg), activity code (0-4). The label is the unrounded formula
//! TDEE plus N(0, 50) noise.

use std::f64::consts::PI;

use nutriplan_core::models::{ActivityLevel, Gender};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::MlError;
use crate::metrics_calculator::mifflin_st_jeor;

/// Number of features the calorie model consumes
pub const FEATURE_COUNT: usize = 5;

/// One encoded feature vector
pub type FeatureRow = [f64; FEATURE_COUNT];

const AGE_RANGE: std::ops::Range<u32> = 18..80;
const HEIGHT_MEAN_CM: f64 = 170.0;
const HEIGHT_SD_CM: f64 = 10.0;
const WEIGHT_MEAN_KG: f64 = 70.0;
const WEIGHT_SD_KG: f64 = 15.0;
const LABEL_NOISE_SD_KCAL: f64 = 50.0;

/// Encode raw biometrics into the model's feature order
#[must_use]
pub fn encode_features(
    age: u32,
    gender: Gender,
    height_cm: f64,
    weight_kg: f64,
    activity: ActivityLevel,
) -> FeatureRow {
    [
        f64::from(age),
        f64::from(gender.feature_code()),
        height_cm,
        weight_kg,
        f64::from(activity.feature_code()),
    ]
}

/// Feature rows paired with regression targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    features: Vec<FeatureRow>,
    targets: Vec<f64>,
}

impl Dataset {
    /// Pair feature rows with targets
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` when the lengths differ
    pub fn new(features: Vec<FeatureRow>, targets: Vec<f64>) -> Result<Self, MlError> {
        if features.len() != targets.len() {
            return Err(MlError::ShapeMismatch {
                features: features.len(),
                targets: targets.len(),
            });
        }
        Ok(Self { features, targets })
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether there are no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Feature rows
    #[must_use]
    pub fn features(&self) -> &[FeatureRow] {
        &self.features
    }

    /// Targets
    #[must_use]
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Rows at the given indices, in index order
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: indices.iter().map(|&i| self.features[i]).collect(),
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
        }
    }
}

/// Sample a standard normal using the Box-Muller transform
fn randn(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-10);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Generate `n_samples` synthetic rows from a fixed seed
///
/// Columns are drawn one after another (ages, genders, heights, weights,
/// activity codes), then one noise term per row, so the same seed always
/// yields the same dataset.
#[must_use]
pub fn generate_synthetic_data(n_samples: usize, seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let ages: Vec<u32> = (0..n_samples).map(|_| rng.gen_range(AGE_RANGE)).collect();
    let genders: Vec<u8> = (0..n_samples).map(|_| rng.gen_range(0..2)).collect();
    let heights: Vec<f64> = (0..n_samples)
        .map(|_| HEIGHT_SD_CM.mul_add(randn(&mut rng), HEIGHT_MEAN_CM))
        .collect();
    let weights: Vec<f64> = (0..n_samples)
        .map(|_| WEIGHT_SD_KG.mul_add(randn(&mut rng), WEIGHT_MEAN_KG))
        .collect();
    let activities: Vec<u8> = (0..n_samples).map(|_| rng.gen_range(0..5)).collect();

    let mut features = Vec::with_capacity(n_samples);
    let mut targets = Vec::with_capacity(n_samples);

    let columns = ages
        .iter()
        .zip(&genders)
        .zip(&heights)
        .zip(&weights)
        .zip(&activities);

    for ((((&age, &gender_code), &height), &weight), &activity_code) in columns {
        let gender = Gender::from_feature_code(gender_code);
        let activity =
            ActivityLevel::from_feature_code(activity_code).unwrap_or(ActivityLevel::Sedentary);

        let bmr = mifflin_st_jeor(weight, height, f64::from(age), gender);
        let tdee = bmr * activity.multiplier();
        let noise = LABEL_NOISE_SD_KCAL * randn(&mut rng);

        features.push(encode_features(age, gender, height, weight, activity));
        targets.push(tdee + noise);
    }

    debug!(n_samples, seed, "Generated synthetic calorie dataset");

    Dataset { features, targets }
}

/// Shuffle row indices with `seed` and split off the first
/// `round(len * test_fraction)` rows as the test set.
///
/// Returns `(train, test)`.
///
/// # Errors
///
/// Returns `InvalidSplit` when either side would be empty
pub fn train_test_split(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset), MlError> {
    let n = dataset.len();
    let n_test = (n as f64 * test_fraction).round() as usize;
    if n_test == 0 || n_test >= n {
        return Err(MlError::InvalidSplit(
            "test fraction leaves an empty train or test set",
        ));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    Ok((dataset.select(train_idx), dataset.select(test_idx)))
}
