use serde::Serialize;

use crate::data::payload::TrendsPayload;
use crate::error::{Result, TrendError};
use crate::processing::ratio::TrendRatioPolicy;
use crate::processing::statistics::{summarize, StatsReadout, SummaryStats};
use crate::processing::trend::{fit_linear_trend, TrendResult};
use crate::state::period_series::Period;

static NEXT_SESSION_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

fn next_session_id() -> u64 {
    NEXT_SESSION_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
}

/// One plotted line of the trends chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub label: String,
    pub values: Vec<f64>,
    /// CSS colour of the line.
    pub color: &'static str,
    pub dashed: bool,
}

impl ChartDataset {
    fn new(label: &str, color: &'static str, dashed: bool) -> Self {
        Self {
            label: label.to_string(),
            values: Vec::new(),
            color,
            dashed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Long-lived trends chart: created once, updated in place, closed on teardown.
///
/// Holds what the rendering surface needs (labels, the raw counts, the
/// fitted trend line and the statistics readout). All arithmetic happens in
/// [`fit_linear_trend`] and [`summarize`]; `update` only wires their results
/// into the datasets.
#[derive(Debug, Serialize)]
pub struct TrendChartSession {
    id: u64,
    period: Period,
    labels: Vec<String>,
    counts: ChartDataset,
    trend: ChartDataset,
    fit: Option<TrendResult>,
    stats: Option<SummaryStats>,
    readout: Option<StatsReadout>,
    updates: u64,
    #[serde(skip)]
    readout_decimals: usize,
}

impl TrendChartSession {
    pub fn open(period: Period) -> Self {
        let session = Self {
            id: next_session_id(),
            period,
            labels: Vec::new(),
            counts: ChartDataset::new("Event Count", "#007bff", false),
            trend: ChartDataset::new("Trend Line", "#dc3545", true),
            fit: None,
            stats: None,
            readout: None,
            updates: 0,
            readout_decimals: 1,
        };
        tracing::debug!("Opened trend chart session {}", session.id);
        session
    }

    pub fn with_readout_decimals(mut self, decimals: usize) -> Self {
        self.readout_decimals = decimals;
        self
    }

    /// Replace the chart contents with a new payload.
    ///
    /// On error the previous contents are left untouched.
    pub fn update(&mut self, payload: &TrendsPayload, policy: TrendRatioPolicy) -> Result<&SummaryStats> {
        let series = payload.series()?;
        let fit = fit_linear_trend(series.values())?;
        let ratio = policy.resolve(series.values(), &fit, payload.trend);
        if !ratio.is_finite() {
            return Err(TrendError::computation(format!(
                "trend ratio is not finite ({ratio}) under the {} policy",
                policy.label()
            )));
        }
        let stats = summarize(series.values(), ratio)?;

        self.labels = payload.periods.clone();
        // The dashboard only draws a trend line through two or more points.
        self.trend.values = if series.len() > 1 {
            fit.fitted_values.clone()
        } else {
            Vec::new()
        };
        self.counts.values = series.into_inner();
        self.readout = Some(StatsReadout::new(&stats, self.readout_decimals));
        self.fit = Some(fit);
        self.updates += 1;

        tracing::debug!(
            "Session {} updated: {} periods, trend ratio {:.4}",
            self.id,
            stats.period_count,
            stats.trend_ratio
        );
        Ok(self.stats.insert(stats))
    }

    /// Switch granularity. Contents are kept until the next `update`.
    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn close(self) {}

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn title(&self) -> String {
        format!("Event Frequency ({})", self.period.label())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn counts(&self) -> &ChartDataset {
        &self.counts
    }

    pub fn trend(&self) -> &ChartDataset {
        &self.trend
    }

    pub fn fit(&self) -> Option<&TrendResult> {
        self.fit.as_ref()
    }

    pub fn stats(&self) -> Option<&SummaryStats> {
        self.stats.as_ref()
    }

    pub fn readout(&self) -> Option<&StatsReadout> {
        self.readout.as_ref()
    }

    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

impl Drop for TrendChartSession {
    fn drop(&mut self) {
        tracing::debug!(
            "Closed trend chart session {} after {} updates",
            self.id,
            self.updates
        );
    }
}
