// ABOUTME: Regression quality metrics for held-out evaluation
// ABOUTME: Coefficient of determination (R²) and mean absolute error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

/// Coefficient of determination
///
/// R² = 1 - `SS_res` / `SS_tot`. Returns 0 for empty input or when the
/// targets have zero variance. Extra elements in the longer slice are ignored.
#[must_use]
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return 0.0;
    }

    let mean = y_true[..n].iter().sum::<f64>() / n as f64;
    let ss_tot: f64 = y_true[..n].iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = y_true[..n]
        .iter()
        .zip(&y_pred[..n])
        .map(|(y, p)| (y - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return 0.0;
    }

    1.0 - ss_res / ss_tot
}

/// Mean absolute error; 0 for empty input
#[must_use]
pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return 0.0;
    }

    y_true
        .iter()
        .zip(y_pred)
        .map(|(y, p)| (y - p).abs())
        .sum::<f64>()
        / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_prediction() {
        let y = [1.0, 2.0, 3.0];
        assert!((r2_score(&y, &y) - 1.0).abs() < 1e-12);
        assert!(mean_absolute_error(&y, &y).abs() < 1e-12);
    }

    #[test]
    fn test_mean_prediction_scores_zero() {
        let y = [1.0, 2.0, 3.0];
        let mean = [2.0, 2.0, 2.0];
        assert!(r2_score(&y, &mean).abs() < 1e-12);
    }

    #[test]
    fn test_constant_targets() {
        let y = [5.0, 5.0];
        assert!(r2_score(&y, &[4.0, 6.0]).abs() < f64::EPSILON);
        assert!((mean_absolute_error(&y, &[4.0, 6.0]) - 1.0).abs() < 1e-12);
    }
}
