// ABOUTME: Environment configuration for model artifact, food table, and training parameters
// ABOUTME: Parses NUTRIPLAN_* variables with defaults and validates the resulting training setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Environment-based configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use nutriplan_intelligence::config::TrainingConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{defaults, env_config};

/// Settings for one planner process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Where the trained model artifact is read from and written to
    pub model_path: PathBuf,
    /// Food table CSV
    pub food_table_path: PathBuf,
    /// Synthetic data and forest parameters
    pub training: TrainingConfig,
    /// Fixed seed for diet sampling; `None` draws from OS entropy
    pub diet_seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(defaults::MODEL_PATH),
            food_table_path: PathBuf::from(defaults::FOOD_TABLE_PATH),
            training: TrainingConfig::default()
                .with_seed(defaults::TRAINING_SEED),
            diet_seed: None,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unparseable, or if the
    /// resulting training configuration is invalid
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let seed: u64 = parse_or(&lookup, env_config::TRAINING_SEED, defaults::TRAINING_SEED)?;

        let training = TrainingConfig {
            n_samples: parse_or(
                &lookup,
                env_config::TRAINING_SAMPLES,
                defaults::TRAINING_SAMPLES,
            )?,
            test_fraction: parse_or(&lookup, env_config::TEST_FRACTION, defaults::TEST_FRACTION)?,
            n_estimators: parse_or(&lookup, env_config::FOREST_TREES, defaults::FOREST_TREES)?,
            ..TrainingConfig::default()
        }
        .with_seed(seed);

        let config = Self {
            model_path: PathBuf::from(
                lookup(env_config::MODEL_PATH).unwrap_or_else(|| defaults::MODEL_PATH.to_owned()),
            ),
            food_table_path: PathBuf::from(
                lookup(env_config::FOOD_TABLE_PATH)
                    .unwrap_or_else(|| defaults::FOOD_TABLE_PATH.to_owned()),
            ),
            training,
            diet_seed: lookup(env_config::DIET_SEED)
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .with_context(|| format!("Invalid {} value", env_config::DIET_SEED))
                })
                .transpose()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the training configuration is invalid
    pub fn validate(&self) -> Result<()> {
        self.training
            .validate()
            .context("Invalid training configuration")
    }

    /// Human-readable summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nutriplan Configuration:\n\
             - Model Artifact: {}\n\
             - Food Table: {}\n\
             - Training Samples: {}\n\
             - Training Seed: {}\n\
             - Forest Trees: {}\n\
             - Test Fraction: {}\n\
             - Diet Seed: {}",
            self.model_path.display(),
            self.food_table_path.display(),
            self.training.n_samples,
            self.training.data_seed,
            self.training.n_estimators,
            self.training.test_fraction,
            self.diet_seed
                .map_or_else(|| "random".to_owned(), |seed| seed.to_string()),
        )
    }
}

/// Parse a variable when present, otherwise return the default
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .with_context(|| format!("Invalid {key} value: {raw}"))
    })
}
