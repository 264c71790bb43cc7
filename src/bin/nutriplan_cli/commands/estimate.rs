// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
// ABOUTME: Estimate command running the full calorie and meal plan pipeline
// ABOUTME: Initializes shared resources, then prints the estimation response as JSON

use clap::Args;
use nutriplan::config::PlannerConfig;
use nutriplan::errors::AppResult;
use nutriplan::resources::PlannerResources;
use nutriplan::services::{estimate, EstimationRequest};

use super::metrics::BiometricArgs;
use crate::helpers::display::print_json;

/// Inputs for a full estimation
#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub biometrics: BiometricArgs,

    /// Weight goal (loss, maintain, gain)
    #[arg(long)]
    pub goal: Option<String>,

    /// Dietary preference (veg, non-veg)
    #[arg(long)]
    pub preference: Option<String>,
}

impl EstimateArgs {
    fn to_request(&self) -> EstimationRequest {
        EstimationRequest {
            goal: self.goal.clone(),
            preference: self.preference.clone(),
            ..self.biometrics.to_request()
        }
    }
}

/// Run one estimation and print the response
pub fn run(config: &PlannerConfig, args: &EstimateArgs) -> AppResult<()> {
    let resources = PlannerResources::initialize(config)?;
    let response = estimate(&resources, &args.to_request())?;
    print_json(&response)
}
