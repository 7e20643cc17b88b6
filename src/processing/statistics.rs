use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendError};
use crate::processing::ratio::TrendDirection;
use crate::state::period_series::validate_counts;

/// Summary of a period series for the statistics panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub average: f64,
    pub max: f64,
    pub trend_ratio: f64,
    pub period_count: usize,
}

impl SummaryStats {
    pub fn direction(&self) -> TrendDirection {
        TrendDirection::from_ratio(self.trend_ratio)
    }

    /// Format as a multi-line report string.
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}:\n  Periods: {}\n  Average: {:.3}\n  Max: {:.3}\n  Trend: {:+.3}\n",
            label, self.period_count, self.average, self.max, self.trend_ratio
        )
    }
}

/// Summarize a non-empty series. `trend_ratio` is carried through untouched.
pub fn summarize(series: &[f64], trend_ratio: f64) -> Result<SummaryStats> {
    if series.is_empty() {
        return Err(TrendError::invalid("cannot summarize an empty series"));
    }
    validate_counts(series)?;

    let period_count = series.len();
    let average = series.iter().sum::<f64>() / period_count as f64;
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(SummaryStats {
        average,
        max,
        trend_ratio,
        period_count,
    })
}

/// Display strings for the statistics readout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReadout {
    pub average: String,
    pub max: String,
    pub trend: String,
    pub periods: String,
    /// CSS colour of the trend value: green when rising or flat, red when falling.
    pub trend_color: &'static str,
}

impl StatsReadout {
    pub fn new(stats: &SummaryStats, decimals: usize) -> Self {
        let max = if stats.max.fract() == 0.0 {
            format!("{:.0}", stats.max)
        } else {
            format!("{:.*}", decimals, stats.max)
        };
        Self {
            average: format!("{:.*}", decimals, stats.average),
            max,
            trend: format!("{:.*}%", decimals, stats.trend_ratio * 100.0),
            periods: stats.period_count.to_string(),
            trend_color: stats.direction().color(),
        }
    }
}

impl From<&SummaryStats> for StatsReadout {
    fn from(stats: &SummaryStats) -> Self {
        Self::new(stats, 1)
    }
}
