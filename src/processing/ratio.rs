//! Trend ratio derivations.
//!
//! The analyzer never invents a trend ratio; callers pick one of these
//! policies (or supply their own number) and pass the result to
//! [`summarize`](crate::processing::statistics::summarize).

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendError};
use crate::processing::trend::TrendResult;

pub const DEFAULT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendRatioPolicy {
    /// Use the ratio reported by the upstream source, falling back to the
    /// fitted change when the payload carries none.
    Upstream,
    /// Relative change between the first and last fitted value.
    FittedChange { epsilon: f64 },
    /// `(last - first) / len` over the raw counts.
    EndpointPerPeriod,
}

impl Default for TrendRatioPolicy {
    fn default() -> Self {
        TrendRatioPolicy::Upstream
    }
}

impl TrendRatioPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            TrendRatioPolicy::Upstream => "upstream",
            TrendRatioPolicy::FittedChange { .. } => "fitted",
            TrendRatioPolicy::EndpointPerPeriod => "endpoint",
        }
    }

    /// Reject an epsilon that could turn a zero start into `0 / 0`.
    pub fn validate(&self) -> Result<()> {
        match *self {
            TrendRatioPolicy::FittedChange { epsilon } if !(epsilon.is_finite() && epsilon > 0.0) => {
                Err(TrendError::invalid(format!(
                    "fitted change epsilon must be finite and positive, got {epsilon}"
                )))
            }
            _ => Ok(()),
        }
    }

    pub fn resolve(&self, counts: &[f64], trend: &TrendResult, upstream: Option<f64>) -> f64 {
        match *self {
            TrendRatioPolicy::Upstream => match upstream {
                Some(ratio) if ratio.is_finite() => ratio,
                _ => fitted_change_ratio(trend, DEFAULT_EPSILON),
            },
            TrendRatioPolicy::FittedChange { epsilon } => fitted_change_ratio(trend, epsilon),
            TrendRatioPolicy::EndpointPerPeriod => endpoint_per_period_ratio(counts),
        }
    }
}

/// `(fitted[last] - fitted[0]) / max(fitted[0], epsilon)`, or 0 below two points.
pub fn fitted_change_ratio(trend: &TrendResult, epsilon: f64) -> f64 {
    let fitted = &trend.fitted_values;
    if fitted.len() < 2 {
        return 0.0;
    }
    let first = fitted[0];
    let last = fitted[fitted.len() - 1];
    (last - first) / first.max(epsilon)
}

pub fn endpoint_per_period_ratio(counts: &[f64]) -> f64 {
    match counts {
        [first, .., last] => (last - first) / counts.len() as f64,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

impl TrendDirection {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.0 {
            TrendDirection::Rising
        } else if ratio < 0.0 {
            TrendDirection::Falling
        } else {
            TrendDirection::Flat
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TrendDirection::Rising | TrendDirection::Flat => "#28a745",
            TrendDirection::Falling => "#dc3545",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "\u{2191}",
            TrendDirection::Falling => "\u{2193}",
            TrendDirection::Flat => "\u{2192}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::trend::fit_linear_trend;
    use approx::assert_relative_eq;

    #[test]
    fn test_fitted_change_ratio() {
        let counts = [2.0, 4.0, 6.0, 8.0, 10.0];
        let trend = fit_linear_trend(&counts).unwrap();
        // (10 - 2) / 2
        assert_relative_eq!(fitted_change_ratio(&trend, DEFAULT_EPSILON), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fitted_change_guards_zero_start() {
        let trend = fit_linear_trend(&[0.0, 1.0]).unwrap();
        let ratio = fitted_change_ratio(&trend, 0.5);
        assert_relative_eq!(ratio, 2.0, epsilon = 1e-9);
        assert!(ratio.is_finite());
    }

    #[test]
    fn test_fitted_change_short_series() {
        let trend = fit_linear_trend(&[4.0]).unwrap();
        assert_eq!(fitted_change_ratio(&trend, DEFAULT_EPSILON), 0.0);
    }

    #[test]
    fn test_endpoint_per_period() {
        assert_relative_eq!(endpoint_per_period_ratio(&[2.0, 5.0, 6.0, 10.0]), 2.0);
        assert_eq!(endpoint_per_period_ratio(&[3.0]), 0.0);
        assert_eq!(endpoint_per_period_ratio(&[]), 0.0);
    }

    #[test]
    fn test_upstream_policy_falls_back() {
        let counts = [1.0, 2.0, 3.0];
        let trend = fit_linear_trend(&counts).unwrap();
        let policy = TrendRatioPolicy::Upstream;
        assert_eq!(policy.resolve(&counts, &trend, Some(0.25)), 0.25);
        assert_relative_eq!(policy.resolve(&counts, &trend, None), 2.0, epsilon = 1e-9);
        assert_relative_eq!(
            policy.resolve(&counts, &trend, Some(f64::NAN)),
            2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_policy_validate_epsilon() {
        assert!(TrendRatioPolicy::FittedChange { epsilon: 0.1 }.validate().is_ok());
        assert!(TrendRatioPolicy::Upstream.validate().is_ok());
        for epsilon in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                TrendRatioPolicy::FittedChange { epsilon }.validate(),
                Err(TrendError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_policy_serde_shape() {
        let json = serde_json::to_string(&TrendRatioPolicy::FittedChange { epsilon: 0.5 }).unwrap();
        assert_eq!(json, r#"{"kind":"fitted_change","epsilon":0.5}"#);
        let back: TrendRatioPolicy = serde_json::from_str(r#"{"kind":"upstream"}"#).unwrap();
        assert_eq!(back, TrendRatioPolicy::Upstream);
    }

    #[test]
    fn test_direction() {
        assert_eq!(TrendDirection::from_ratio(0.1), TrendDirection::Rising);
        assert_eq!(TrendDirection::from_ratio(-0.1), TrendDirection::Falling);
        assert_eq!(TrendDirection::from_ratio(0.0), TrendDirection::Flat);
        assert_eq!(TrendDirection::Flat.color(), "#28a745");
    }
}
