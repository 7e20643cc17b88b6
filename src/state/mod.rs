pub mod chart_session;
pub mod period_series;
