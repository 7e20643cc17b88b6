//! Trend analysis for EONET event-frequency charts.
//!
//! The core is two pure functions, [`fit_linear_trend`] and [`summarize`].
//! Around them sit the upstream payload types, period bucketing, CSV
//! import/export and a [`TrendChartSession`] that feeds a rendering surface.

pub mod config;
pub mod data;
pub mod error;
pub mod processing;
pub mod state;

pub use config::TrendConfig;
pub use data::payload::TrendsPayload;
pub use error::{Result, TrendError};
pub use processing::ratio::{TrendDirection, TrendRatioPolicy};
pub use processing::statistics::{summarize, StatsReadout, SummaryStats};
pub use processing::trend::{fit_linear_trend, TrendResult};
pub use state::chart_session::TrendChartSession;
pub use state::period_series::{Period, PeriodSeries};
