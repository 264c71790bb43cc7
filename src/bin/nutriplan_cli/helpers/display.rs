// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
// ABOUTME: Output formatting helpers for nutriplan-cli
// ABOUTME: JSON results on stdout, human-readable summaries on stderr

use nutriplan::errors::{AppError, AppResult, ErrorResponse};
use nutriplan::intelligence::{PersistenceStatus, TrainingReport};
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an error response as JSON on stdout
pub fn print_error(error: AppError) {
    let response = ErrorResponse::from(error);
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{json}"),
        Err(_) => eprintln!("{}", response.error.message),
    }
}

/// Summarize a training run on stderr
pub fn display_training_report(report: &TrainingReport) {
    eprintln!("\nCalorie model trained");
    eprintln!("{}", "=".repeat(60));
    eprintln!("   Trees: {}", report.n_estimators);
    eprintln!("   Train rows: {}", report.train_rows);
    eprintln!("   Test rows: {}", report.test_rows);
    eprintln!("   Held-out R2: {:.4}", report.held_out_r2);
    eprintln!("   Held-out MAE: {:.1} kcal", report.held_out_mae);
    eprintln!(
        "   Trained at: {}",
        report.trained_at.format("%Y-%m-%d %H:%M UTC")
    );

    match &report.persistence {
        PersistenceStatus::Saved { path } => {
            eprintln!("   Artifact: saved to {}", path.display());
        }
        PersistenceStatus::NotSaved { path, reason } => {
            eprintln!("   Artifact: NOT saved to {} ({reason})", path.display());
            eprintln!("   The model was used for this run only.");
        }
    }
    eprintln!("{}", "=".repeat(60));
}
