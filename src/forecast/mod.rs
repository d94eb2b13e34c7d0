//! Daily-candle price forecasting: fetch, feature build, fit, evaluate,
//! and a one-day-ahead prediction.

pub mod features;
pub mod market;
pub mod model;

use std::fmt;

use chrono::DateTime;

use crate::config::ForecastConfig;
use market::{MarketClient, MarketError};
use model::{Evaluation, ModelError};

/// Forecast pipeline failure.
#[derive(Debug)]
pub enum ForecastError {
    /// Market fetch failed.
    Market(MarketError),
    /// Feature set was too small or the fit failed.
    Model(ModelError),
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market(e) => e.fmt(f),
            Self::Model(e) => e.fmt(f),
        }
    }
}

impl From<MarketError> for ForecastError {
    fn from(e: MarketError) -> Self {
        Self::Market(e)
    }
}

impl From<ModelError> for ForecastError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

/// Everything one forecast run produces.
#[derive(Debug, Clone)]
pub struct ForecastRun {
    /// Trading pair the run was made for.
    pub symbol: String,
    /// Candles fetched.
    pub candle_count: usize,
    /// Date of the earliest candle (UTC).
    pub first_date: String,
    /// Date of the latest candle (UTC).
    pub last_date: String,
    /// Held-out evaluation of the fitted model.
    pub evaluation: Evaluation,
    /// One-day-ahead close prediction from the latest feature row.
    pub next_close: f64,
}

impl fmt::Display for ForecastRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} daily candles, {} to {}",
            self.symbol, self.candle_count, self.first_date, self.last_date
        )?;
        writeln!(f, "{}", self.evaluation)?;
        write!(f, "Tomorrow's close forecast: {:.2}", self.next_close)
    }
}

/// Formats an epoch-millisecond close time as a UTC calendar date.
fn date_of(close_time_ms: i64) -> String {
    DateTime::from_timestamp_millis(close_time_ms)
        .map(|dt| dt.date_naive().to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Runs the whole pipeline against the configured endpoint.
///
/// # Errors
///
/// Network and HTTP failures propagate as `ForecastError::Market` with no
/// retry; an undersized candle history surfaces as `ForecastError::Model`.
pub fn run(cfg: &ForecastConfig) -> Result<ForecastRun, ForecastError> {
    let client = MarketClient::from_config(cfg);
    let candles = client.fetch_daily(&cfg.symbol, cfg.days)?;
    run_on_candles(cfg, &candles)
}

/// Runs feature building, fitting, and evaluation over already-fetched
/// candles. Split out so the pipeline is testable without a network.
pub fn run_on_candles(
    cfg: &ForecastConfig,
    candles: &[market::Candle],
) -> Result<ForecastRun, ForecastError> {
    let set = features::build(candles);
    let (model, evaluation) = model::train_and_evaluate(&set, cfg.train_ratio)?;

    // One-step-ahead forecast from the latest feature row.
    let last_row = set.rows.last().ok_or(ModelError::NotEnoughData { rows: 0 })?;
    let next_close = model.predict(last_row);

    Ok(ForecastRun {
        symbol: cfg.symbol.to_uppercase(),
        candle_count: candles.len(),
        first_date: date_of(candles.first().map_or(0, |c| c.close_time_ms)),
        last_date: date_of(candles.last().map_or(0, |c| c.close_time_ms)),
        evaluation,
        next_close,
    })
}
