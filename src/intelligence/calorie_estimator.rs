// ABOUTME: Calorie estimator owning the random-forest model, its artifact file, and its lifecycle
// ABOUTME: Loads a persisted model or trains one on synthetic data, then serves shared predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Calorie Estimator
//!
//! The estimator moves once from `Uninitialized` to either `Loaded` (an
//! artifact was found) or `Trained` (none was found, or `retrain` was
//! called). Readiness is gated by a mutex so concurrent first use trains at
//! most once; afterwards the fitted model is handed out as an `Arc` and
//! only read.
//!
//! Failing to write the artifact after training is not an error. The model
//! stays usable in memory and the report carries `PersistenceStatus::NotSaved`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use nutriplan_core::models::{ActivityLevel, BiometricProfile, Gender};
use nutriplan_intelligence::config::TrainingConfig;
use nutriplan_intelligence::ml::{
    encode_features, generate_synthetic_data, mean_absolute_error, r2_score, train_test_split,
    ForestParams, RandomForestRegressor, TreeParams, FEATURE_COUNT,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::PlannerConfig;
use crate::constants::artifact;
use crate::errors::{from_config_error, from_ml_error, AppError, AppResult};

/// Where the active model came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelLifecycle {
    /// No model yet
    Uninitialized,
    /// Deserialized from the artifact file
    Loaded,
    /// Fitted in this process
    Trained,
}

/// Serialized model envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Envelope version; loading rejects anything else
    pub format_version: u32,
    /// When the forest was fitted
    pub trained_at: DateTime<Utc>,
    /// Parameters the forest was trained with
    pub training: TrainingConfig,
    /// R² on the held-out split
    pub held_out_r2: f64,
    /// The fitted forest
    pub forest: RandomForestRegressor,
}

/// Outcome of writing the artifact after training
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistenceStatus {
    /// Artifact written
    Saved {
        /// Final artifact path
        path: PathBuf,
    },
    /// Artifact could not be written; the model is in memory only
    NotSaved {
        /// Path that was attempted
        path: PathBuf,
        /// Why the write failed
        reason: String,
    },
}

impl PersistenceStatus {
    /// Whether the artifact reached disk
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Summary of one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Rows used for fitting
    pub train_rows: usize,
    /// Rows held out for scoring
    pub test_rows: usize,
    /// R² on the held-out rows
    pub held_out_r2: f64,
    /// Mean absolute error on the held-out rows (kcal)
    pub held_out_mae: f64,
    /// Number of trees fitted
    pub n_estimators: usize,
    /// When training finished
    pub trained_at: DateTime<Utc>,
    /// Whether the artifact was written
    pub persistence: PersistenceStatus,
}

struct EstimatorState {
    model: Option<Arc<ModelArtifact>>,
    lifecycle: ModelLifecycle,
    last_report: Option<TrainingReport>,
}

/// Trained calorie model with lazy initialization
pub struct CalorieEstimator {
    model_path: PathBuf,
    training: TrainingConfig,
    state: Mutex<EstimatorState>,
}

impl CalorieEstimator {
    /// Estimator that reads and writes its artifact at `model_path`
    #[must_use]
    pub fn new(model_path: impl Into<PathBuf>, training: TrainingConfig) -> Self {
        Self {
            model_path: model_path.into(),
            training,
            state: Mutex::new(EstimatorState {
                model: None,
                lifecycle: ModelLifecycle::Uninitialized,
                last_report: None,
            }),
        }
    }

    /// Estimator configured from planner settings
    #[must_use]
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.model_path.clone(), config.training.clone())
    }

    /// Artifact location
    #[must_use]
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Training parameters used when no artifact is found
    #[must_use]
    pub const fn training_config(&self) -> &TrainingConfig {
        &self.training
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, EstimatorState>> {
        self.state
            .lock()
            .map_err(|_| AppError::internal("Calorie estimator state lock poisoned"))
    }

    /// Current lifecycle state
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the state lock is poisoned
    pub fn lifecycle(&self) -> AppResult<ModelLifecycle> {
        Ok(self.lock()?.lifecycle)
    }

    /// Report from the most recent training run in this process
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the state lock is poisoned
    pub fn last_report(&self) -> AppResult<Option<TrainingReport>> {
        Ok(self.lock()?.last_report.clone())
    }

    /// Make a model available: deserialize the artifact when it exists,
    /// otherwise train a new one. Does nothing if a model is already active.
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` if the artifact cannot be read or parsed,
    /// or if training fails
    pub fn load(&self) -> AppResult<ModelLifecycle> {
        let mut state = self.lock()?;
        self.ready_locked(&mut state)?;
        Ok(state.lifecycle)
    }

    /// Return the active model, loading or training it on first use
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::load`]
    pub fn ensure_ready(&self) -> AppResult<Arc<ModelArtifact>> {
        let mut state = self.lock()?;
        self.ready_locked(&mut state)
    }

    /// Train unconditionally, replace the active model, and try to persist it
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for a bad training configuration and
    /// `ModelUnavailable` if fitting fails
    pub fn train(&self) -> AppResult<TrainingReport> {
        let mut state = self.lock()?;
        self.train_locked(&mut state)
    }

    /// Retrain even when a model is active, overwriting the artifact on disk
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::train`]
    pub fn retrain(&self) -> AppResult<TrainingReport> {
        info!(path = %self.model_path.display(), "Retraining calorie model");
        self.train()
    }

    /// Predict daily calories for raw biometrics
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` if no model can be loaded or trained
    pub fn predict(
        &self,
        age: u32,
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
        activity_level: ActivityLevel,
    ) -> AppResult<f64> {
        let model = self.ensure_ready()?;
        let features = encode_features(age, gender, height_cm, weight_kg, activity_level);
        model
            .forest
            .predict_row(&features)
            .map_err(|e| from_ml_error(&e))
    }

    /// Predict daily calories for a validated profile
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::predict`]
    pub fn predict_profile(&self, profile: &BiometricProfile) -> AppResult<f64> {
        self.predict(
            profile.age(),
            profile.gender(),
            profile.height_cm(),
            profile.weight_kg(),
            profile.activity_level(),
        )
    }

    fn ready_locked(&self, state: &mut EstimatorState) -> AppResult<Arc<ModelArtifact>> {
        if let Some(model) = &state.model {
            return Ok(Arc::clone(model));
        }

        if self.model_path.exists() {
            let model = Arc::new(read_artifact(&self.model_path)?);
            info!(
                path = %self.model_path.display(),
                trained_at = %model.trained_at,
                held_out_r2 = model.held_out_r2,
                "Loaded calorie model artifact"
            );
            state.model = Some(Arc::clone(&model));
            state.lifecycle = ModelLifecycle::Loaded;
            return Ok(model);
        }

        info!(
            path = %self.model_path.display(),
            "No model artifact found; training a new model"
        );
        self.train_locked(state)?;
        state
            .model
            .clone()
            .ok_or_else(|| AppError::internal("Training finished without installing a model"))
    }

    fn train_locked(&self, state: &mut EstimatorState) -> AppResult<TrainingReport> {
        let config = &self.training;
        config.validate().map_err(|e| from_config_error(&e))?;

        info!(
            n_samples = config.n_samples,
            n_estimators = config.n_estimators,
            seed = config.data_seed,
            "Training calorie model on synthetic data"
        );

        let dataset = generate_synthetic_data(config.n_samples, config.data_seed);
        let (train, test) = train_test_split(&dataset, config.test_fraction, config.split_seed)
            .map_err(|e| from_ml_error(&e))?;

        let mut forest = RandomForestRegressor::new(ForestParams {
            n_estimators: config.n_estimators,
            random_state: config.forest_seed,
            tree: TreeParams {
                max_depth: config.max_depth,
                min_samples_split: config.min_samples_split,
                min_samples_leaf: config.min_samples_leaf,
            },
        });
        forest
            .fit(train.features(), train.targets())
            .map_err(|e| from_ml_error(&e))?;

        let predictions = forest
            .predict(test.features())
            .map_err(|e| from_ml_error(&e))?;
        let held_out_r2 = r2_score(test.targets(), &predictions);
        let held_out_mae = mean_absolute_error(test.targets(), &predictions);

        info!(
            held_out_r2,
            held_out_mae,
            train_rows = train.len(),
            test_rows = test.len(),
            "Model trained. R2 Score: {held_out_r2:.4}"
        );

        let artifact = ModelArtifact {
            format_version: artifact::FORMAT_VERSION,
            trained_at: Utc::now(),
            training: config.clone(),
            held_out_r2,
            forest,
        };

        let persistence = match write_artifact(&artifact, &self.model_path) {
            Ok(()) => {
                info!(path = %self.model_path.display(), "Saved calorie model artifact");
                PersistenceStatus::Saved {
                    path: self.model_path.clone(),
                }
            }
            Err(e) => {
                warn!(
                    path = %self.model_path.display(),
                    error = %e,
                    "Could not save calorie model; keeping it in memory only"
                );
                PersistenceStatus::NotSaved {
                    path: self.model_path.clone(),
                    reason: e.to_string(),
                }
            }
        };

        let report = TrainingReport {
            train_rows: train.len(),
            test_rows: test.len(),
            held_out_r2,
            held_out_mae,
            n_estimators: config.n_estimators,
            trained_at: artifact.trained_at,
            persistence,
        };

        state.model = Some(Arc::new(artifact));
        state.lifecycle = ModelLifecycle::Trained;
        state.last_report = Some(report.clone());

        Ok(report)
    }
}

/// Read and check a model artifact
///
/// # Errors
///
/// Returns `ModelUnavailable` when the file cannot be read, does not parse,
/// has another format version, or holds an unfitted or misshapen forest
pub fn read_artifact(path: &Path) -> AppResult<ModelArtifact> {
    let unavailable = |message: String| {
        AppError::model_unavailable(message).with_resource_id(path.display().to_string())
    };

    let raw = fs::read_to_string(path).map_err(|e| {
        unavailable(format!("Cannot read model artifact {}: {e}", path.display())).with_source(e)
    })?;

    let model: ModelArtifact = serde_json::from_str(&raw).map_err(|e| {
        unavailable(format!("Cannot parse model artifact {}: {e}", path.display())).with_source(e)
    })?;

    if model.format_version != artifact::FORMAT_VERSION {
        return Err(unavailable(format!(
            "Unsupported model artifact version {} (expected {})",
            model.format_version,
            artifact::FORMAT_VERSION
        ))
        .with_details(json!({
            "found": model.format_version,
            "expected": artifact::FORMAT_VERSION,
        })));
    }
    if !model.forest.is_fitted() || model.forest.n_features() != FEATURE_COUNT {
        return Err(unavailable(format!(
            "Model artifact {} does not contain a fitted {FEATURE_COUNT}-feature forest",
            path.display()
        ))
        .with_details(json!({
            "n_features": model.forest.n_features(),
            "trees": model.forest.trees().len(),
        })));
    }
    model.forest.check_structure().map_err(|e| {
        unavailable(format!(
            "Model artifact {} has a malformed forest: {e}",
            path.display()
        ))
        .with_details(json!({ "reason": e.to_string() }))
    })?;

    debug!(trees = model.forest.trees().len(), "Parsed model artifact");
    Ok(model)
}

/// Write an artifact to a sibling temporary file, then rename it into place
///
/// # Errors
///
/// Returns `SerializationError` or `StorageError` on failure; the temporary
/// file is removed if the rename does not happen
pub fn write_artifact(model: &ModelArtifact, path: &Path) -> AppResult<()> {
    let bytes = serde_json::to_vec(model)?;

    let mut tmp_name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    tmp_name.push(".");
    tmp_name.push(artifact::TEMP_SUFFIX);
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, bytes).map_err(|e| {
        AppError::storage(format!("Cannot write {}: {e}", tmp_path.display())).with_source(e)
    })?;

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(
            AppError::storage(format!("Cannot move artifact to {}: {e}", path.display()))
                .with_source(e),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use nutriplan_core::errors::ErrorCode;

    use super::*;

    fn small_training() -> TrainingConfig {
        TrainingConfig {
            n_samples: 120,
            n_estimators: 4,
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_starts_uninitialized() {
        let dir = tempfile::tempdir().unwrap();
        let estimator = CalorieEstimator::new(dir.path().join("model.json"), small_training());
        assert_eq!(estimator.lifecycle().unwrap(), ModelLifecycle::Uninitialized);
        assert!(estimator.last_report().unwrap().is_none());
        assert_eq!(estimator.model_path(), dir.path().join("model.json"));
        assert_eq!(estimator.training_config().n_estimators, 4);
    }

    #[test]
    fn test_train_reports_split_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let estimator = CalorieEstimator::new(dir.path().join("model.json"), small_training());

        let report = estimator.train().unwrap();

        assert_eq!(report.train_rows, 96);
        assert_eq!(report.test_rows, 24);
        assert!(report.persistence.is_saved());
        assert_eq!(estimator.lifecycle().unwrap(), ModelLifecycle::Trained);
    }

    #[test]
    fn test_artifact_with_unknown_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let estimator = CalorieEstimator::new(&path, small_training());
        estimator.train().unwrap();

        let mut artifact = read_artifact(&path).unwrap();
        artifact.format_version = 99;
        fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

        let err = read_artifact(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelUnavailable);
        assert_eq!(err.context.details["found"], 99);
        assert_eq!(err.context.details["expected"], artifact::FORMAT_VERSION);
        assert_eq!(
            err.context.resource_id.as_deref(),
            Some(path.display().to_string().as_str())
        );
    }

    #[test]
    fn test_no_temporary_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        CalorieEstimator::new(&path, small_training())
            .train()
            .unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("model.json.tmp").exists());
    }
}
