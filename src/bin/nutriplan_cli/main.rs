// ABOUTME: Nutriplan CLI - command-line front end for calorie estimation and model management
// ABOUTME: Runs estimates, retrains the calorie model, and prints formula-only metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
//!
//! Usage:
//! ```bash
//! # Estimate calories and a meal plan
//! nutriplan-cli estimate --age 30 --gender male --height 175 --weight 70 \
//!     --activity sedentary --goal maintain --preference veg
//!
//! # Retrain the model and overwrite the artifact
//! nutriplan-cli train
//!
//! # BMI, BMR and TDEE only
//! nutriplan-cli metrics --age 30 --gender female --height 165 --weight 60 --activity very_active
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr. Failures print
//! an error response and exit with a code derived from the error category.

mod commands;
mod helpers;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nutriplan::config::PlannerConfig;
use nutriplan::errors::{AppError, AppResult};
use nutriplan::logging::LoggingConfig;
use tracing::debug;

use commands::{estimate::EstimateArgs, metrics::BiometricArgs};

#[derive(Parser)]
#[command(
    name = "nutriplan-cli",
    about = "Nutriplan calorie estimation CLI",
    long_about = "Estimate daily calorie needs, suggest meals, and manage the trained calorie model."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Estimate daily calories and recommend meals
    Estimate(EstimateArgs),

    /// Retrain the calorie model and overwrite the artifact
    Train,

    /// Print BMI, BMR and TDEE without the model
    Metrics(BiometricArgs),
}

fn run(cli: Cli) -> AppResult<()> {
    let config = PlannerConfig::from_env().map_err(|e| AppError::config(format!("{e:#}")))?;
    debug!("{}", config.summary());

    match cli.command {
        Command::Estimate(args) => commands::estimate::run(&config, &args),
        Command::Train => commands::train::run(&config),
        Command::Metrics(args) => commands::metrics::run(&args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let code = error.code.exit_code();
            helpers::display::print_error(error);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
