// ABOUTME: Centralized resource container shared by every estimation request
// ABOUTME: Holds the calorie estimator, diet recommender, and configuration behind Arc handles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Planner Resources
//!
//! Built once per process and passed by reference to the services, so the
//! model and food table are never reloaded per request.

use std::sync::Arc;

use nutriplan_intelligence::DietRecommender;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::PlannerConfig;
use crate::errors::AppResult;
use crate::external::{FoodTable, FoodTableSource};
use crate::intelligence::{CalorieEstimator, ModelLifecycle};

/// Shared resources for estimation
#[derive(Clone)]
pub struct PlannerResources {
    /// Process configuration
    pub config: Arc<PlannerConfig>,
    /// Calorie model, loaded or trained on first use
    pub estimator: Arc<CalorieEstimator>,
    /// Food table wrapped for meal selection
    pub recommender: Arc<DietRecommender>,
    /// Whether the food table file was found
    pub food_source: FoodTableSource,
}

impl PlannerResources {
    /// Load the food table and construct the estimator without touching the model
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the food table exists but is malformed
    pub fn new(config: &PlannerConfig) -> AppResult<Self> {
        let (table, food_source) = FoodTable::load(&config.food_table_path)?;

        Ok(Self {
            config: Arc::new(config.clone()),
            estimator: Arc::new(CalorieEstimator::from_config(config)),
            recommender: Arc::new(DietRecommender::new(table.into_items())),
            food_source,
        })
    }

    /// Build resources and make the model ready before the first request
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for a malformed food table and
    /// `ModelUnavailable` if the model can be neither loaded nor trained
    pub fn initialize(config: &PlannerConfig) -> AppResult<Self> {
        let resources = Self::new(config)?;
        let lifecycle = resources.estimator.load()?;

        info!(
            model = ?lifecycle,
            food_rows = resources.recommender.foods().len(),
            "Planner resources initialized"
        );

        Ok(resources)
    }

    /// Lifecycle of the shared model
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the estimator lock is poisoned
    pub fn model_lifecycle(&self) -> AppResult<ModelLifecycle> {
        self.estimator.lifecycle()
    }

    /// Random source for one diet recommendation
    ///
    /// Seeded from `NUTRIPLAN_DIET_SEED` when set, otherwise from OS entropy.
    #[must_use]
    pub fn diet_rng(&self) -> ChaCha8Rng {
        self.config
            .diet_seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
    }
}
