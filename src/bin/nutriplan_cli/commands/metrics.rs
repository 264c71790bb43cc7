// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
// ABOUTME: Metrics command printing formula-only BMI, BMR and TDEE
// ABOUTME: Also defines the biometric arguments shared with the estimate command

use clap::Args;
use nutriplan::errors::AppResult;
use nutriplan::services::{metrics_for, EstimationRequest};

use crate::helpers::display::print_json;

/// Biometric inputs; validation happens in the service layer
#[derive(Debug, Clone, Args)]
pub struct BiometricArgs {
    /// Age in whole years
    #[arg(long, allow_hyphen_values = true)]
    pub age: Option<String>,

    /// Gender ("male" selects the male formula; anything else the female one)
    #[arg(long)]
    pub gender: Option<String>,

    /// Height in centimetres
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Weight in kilograms
    #[arg(long, allow_hyphen_values = true)]
    pub weight: Option<String>,

    /// Activity level (sedentary, lightly_active, moderately_active, very_active, extra_active)
    #[arg(long)]
    pub activity: Option<String>,
}

impl BiometricArgs {
    /// Request carrying only the biometric fields
    pub fn to_request(&self) -> EstimationRequest {
        EstimationRequest {
            age: self.age.clone(),
            gender: self.gender.clone(),
            height: self.height.clone(),
            weight: self.weight.clone(),
            activity: self.activity.clone(),
            ..EstimationRequest::default()
        }
    }
}

/// Print formula metrics for the given biometrics
pub fn run(args: &BiometricArgs) -> AppResult<()> {
    let metrics = metrics_for(&args.to_request())?;
    print_json(&metrics)
}
