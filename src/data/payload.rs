use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendError};
use crate::state::period_series::PeriodSeries;

/// Response body of the upstream trends endpoint.
///
/// `periods` and `counts` are parallel arrays in chronological order. The
/// server also reports its own `trend`, `average`, `max` and `min`; only
/// `trend` is consumed, the rest are kept for callers that want to compare.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendsPayload {
    pub periods: Vec<String>,
    pub counts: Vec<f64>,
    #[serde(default)]
    pub trend: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

impl TrendsPayload {
    pub fn new(periods: Vec<String>, counts: Vec<f64>, trend: Option<f64>) -> Self {
        Self {
            periods,
            counts,
            trend,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.periods.len() != self.counts.len() {
            return Err(TrendError::invalid(format!(
                "payload has {} periods but {} counts",
                self.periods.len(),
                self.counts.len()
            )));
        }
        Ok(())
    }

    /// Validated copy of `counts`.
    pub fn series(&self) -> Result<PeriodSeries> {
        self.validate()?;
        PeriodSeries::new(self.counts.clone())
    }
}
