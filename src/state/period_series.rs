use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendError};

/// Time bucket granularity used by the upstream trends source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Default for Period {
    fn default() -> Self {
        Period::Monthly
    }
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Daily => "Daily",
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
        }
    }

    /// strftime pattern of the bucket key. Weekly keys use Monday-based week numbers.
    pub fn key_format(&self) -> &'static str {
        match self {
            Period::Daily => "%Y-%m-%d",
            Period::Weekly => "%Y-W%W",
            Period::Monthly => "%Y-%m",
        }
    }

    pub fn bucket_key(&self, date: NaiveDate) -> String {
        date.format(self.key_format()).to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

impl FromStr for Period {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Period::Daily),
            "weekly" | "week" => Ok(Period::Weekly),
            "monthly" | "month" => Ok(Period::Monthly),
            other => Err(TrendError::invalid(format!("unknown period '{other}'"))),
        }
    }
}

/// Check that every count is a finite, non-negative number.
pub fn validate_counts(values: &[f64]) -> Result<()> {
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            return Err(TrendError::invalid(format!("value at index {i} is not finite ({v})")));
        }
        if v < 0.0 {
            return Err(TrendError::invalid(format!("value at index {i} is negative ({v})")));
        }
    }
    Ok(())
}

/// Ordered per-period event counts, oldest period first.
///
/// Construction validates that all values are finite and non-negative, so a
/// `PeriodSeries` can be handed to the analyzer without further checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PeriodSeries(Vec<f64>);

impl PeriodSeries {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        validate_counts(&values)?;
        Ok(Self(values))
    }

    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self(counts.into_iter().map(|c| c as f64).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for PeriodSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for PeriodSeries {
    type Error = TrendError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<PeriodSeries> for Vec<f64> {
    fn from(series: PeriodSeries) -> Self {
        series.0
    }
}
