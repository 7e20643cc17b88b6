use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use eonet_trends::data::datetime::format_period_label;
use eonet_trends::data::export::export_csv_file;
use eonet_trends::data::loader::load_payload;
use eonet_trends::processing::ratio::{TrendRatioPolicy, DEFAULT_EPSILON};
use eonet_trends::{Period, TrendChartSession, TrendConfig};

/// Trend ratio policy selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RatioArg {
    /// Ratio reported by the server, fitted change when absent
    Upstream,
    /// Relative change along the fitted trend line
    Fitted,
    /// (last - first) / periods over the raw counts
    Endpoint,
}

impl RatioArg {
    fn policy(self, epsilon: f64) -> TrendRatioPolicy {
        match self {
            RatioArg::Upstream => TrendRatioPolicy::Upstream,
            RatioArg::Fitted => TrendRatioPolicy::FittedChange { epsilon },
            RatioArg::Endpoint => TrendRatioPolicy::EndpointPerPeriod,
        }
    }
}

#[derive(Parser)]
#[command(name = "eonet-trends")]
#[command(about = "Fit trend lines and summary statistics to EONET event counts", long_about = None)]
struct Cli {
    /// Trends payload (JSON) or period,count table (CSV, XLS, XLSX)
    input: PathBuf,

    /// Period granularity of the input (daily, weekly, monthly)
    #[arg(short, long)]
    period: Option<Period>,

    /// Trend ratio policy
    #[arg(short, long, value_enum)]
    ratio: Option<RatioArg>,

    /// Write period, count and trend columns to this CSV file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TrendConfig::load(path).with_context(|| format!("loading config {path:?}"))?,
        None => TrendConfig::default(),
    };
    if let Some(period) = cli.period {
        config.period = period;
    }
    if let Some(ratio) = cli.ratio {
        let epsilon = match config.ratio {
            TrendRatioPolicy::FittedChange { epsilon } => epsilon,
            _ => DEFAULT_EPSILON,
        };
        config.ratio = ratio.policy(epsilon);
    }

    let payload = load_payload(&cli.input).with_context(|| format!("loading {:?}", cli.input))?;

    let mut session =
        TrendChartSession::open(config.period).with_readout_decimals(config.readout_decimals);
    let stats = session
        .update(&payload, config.ratio)
        .context("analyzing event counts")?
        .clone();

    tracing::info!("{}", session.title());
    if let (Some(first), Some(last)) = (session.labels().first(), session.labels().last()) {
        tracing::info!(
            "Range: {} to {}",
            format_period_label(first, config.period),
            format_period_label(last, config.period)
        );
    }
    if let Some(fit) = session.fit() {
        tracing::info!(
            "Trend line: slope {:.4}, intercept {:.4}, change over range {:+.2}",
            fit.slope,
            fit.intercept,
            fit.total_change()
        );
        if stats.period_count > 1 {
            tracing::info!(
                "Next period projection: {:.1}",
                fit.value_at(stats.period_count as f64).max(0.0)
            );
        }
    }
    tracing::debug!("{}", stats.report(&session.title()));
    if let Some(readout) = session.readout() {
        tracing::info!(
            "Average {} | Max {} | Trend {} {} | Periods {} (ratio: {})",
            readout.average,
            readout.max,
            stats.direction().symbol(),
            readout.trend,
            readout.periods,
            config.ratio.label()
        );
    }

    if let Some(path) = &cli.export {
        export_csv_file(
            path,
            session.labels(),
            &session.counts().values,
            &session.trend().values,
        )
        .with_context(|| format!("exporting CSV to {path:?}"))?;
    }

    session.close();
    Ok(())
}
