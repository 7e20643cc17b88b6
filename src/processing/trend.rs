//! Least-squares trend line over the period index.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendError};
use crate::state::period_series::validate_counts;

/// Best-fit line `y = slope * i + intercept` and its value at every index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub fitted_values: Vec<f64>,
    pub slope: f64,
    pub intercept: f64,
}

impl TrendResult {
    /// Value of the trend line at an arbitrary index, including past the end.
    pub fn value_at(&self, index: f64) -> f64 {
        self.slope * index + self.intercept
    }

    /// Change between the first and last fitted value.
    pub fn total_change(&self) -> f64 {
        match (self.fitted_values.first(), self.fitted_values.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

/// Fit an ordinary least-squares line through `(i, series[i])`.
///
/// Fewer than two points cannot define a line, so the input is passed
/// through unchanged with a zero slope.
pub fn fit_linear_trend(series: &[f64]) -> Result<TrendResult> {
    validate_counts(series)?;

    let n = series.len();
    if n < 2 {
        return Ok(TrendResult {
            fitted_values: series.to_vec(),
            slope: 0.0,
            intercept: series.first().copied().unwrap_or(0.0),
        });
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (i, &y) in series.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let nf = n as f64;
    let denominator = nf * sum_xx - sum_x * sum_x;
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(TrendError::computation(format!(
            "degenerate normal equations (denominator {denominator})"
        )));
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / nf;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(TrendError::computation(format!(
            "non-finite fit (slope {slope}, intercept {intercept})"
        )));
    }

    let fitted_values: Vec<f64> = (0..n).map(|i| slope * i as f64 + intercept).collect();
    if let Some(i) = fitted_values.iter().position(|v| !v.is_finite()) {
        return Err(TrendError::computation(format!(
            "fitted value at index {i} is not finite"
        )));
    }

    Ok(TrendResult {
        fitted_values,
        slope,
        intercept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_passthrough() {
        let r = fit_linear_trend(&[]).unwrap();
        assert!(r.fitted_values.is_empty());
        assert_eq!(r.slope, 0.0);
        assert_eq!(r.intercept, 0.0);
    }

    #[test]
    fn test_single_point_passthrough() {
        let r = fit_linear_trend(&[7.0]).unwrap();
        assert_eq!(r.fitted_values, vec![7.0]);
        assert_eq!(r.slope, 0.0);
        assert_eq!(r.intercept, 7.0);
    }

    #[test]
    fn test_perfect_line() {
        let input = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = fit_linear_trend(&input).unwrap();
        assert_relative_eq!(r.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(r.intercept, 2.0, epsilon = 1e-12);
        for (fitted, expected) in r.fitted_values.iter().zip(input.iter()) {
            assert_relative_eq!(*fitted, *expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_constant_series() {
        let r = fit_linear_trend(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert_relative_eq!(r.slope, 0.0, epsilon = 1e-12);
        for v in &r.fitted_values {
            assert_relative_eq!(*v, 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_noisy_series() {
        // x = 0..3, y = [1, 3, 2, 4]: slope 0.8, intercept 1.3
        let r = fit_linear_trend(&[1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_relative_eq!(r.slope, 0.8, epsilon = 1e-12);
        assert_relative_eq!(r.intercept, 1.3, epsilon = 1e-12);
        assert_relative_eq!(r.total_change(), 2.4, epsilon = 1e-12);
        assert_relative_eq!(r.value_at(5.0), 5.3, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            fit_linear_trend(&[1.0, f64::NAN]),
            Err(TrendError::InvalidInput { .. })
        ));
        assert!(matches!(
            fit_linear_trend(&[-1.0, 2.0]),
            Err(TrendError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_overflow_is_computation_error() {
        let huge = f64::MAX / 2.0;
        assert!(matches!(
            fit_linear_trend(&[huge, huge, huge]),
            Err(TrendError::ComputationError { .. })
        ));
    }
}
