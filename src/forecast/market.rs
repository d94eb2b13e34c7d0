//! Daily-candle market data over HTTP.
//!
//! One blocking GET against a public klines endpoint. Network and HTTP
//! failures propagate to the caller; there are no retries.

use std::fmt;
use std::io;
use std::time::Duration;

use serde_json::Value;

use crate::config::ForecastConfig;

/// Candle rows the endpoint can return per request.
const MAX_ROWS: usize = 1000;

/// Index of the close price in a raw candle row.
const CLOSE_IDX: usize = 4;
/// Index of the base-asset volume in a raw candle row.
const VOLUME_IDX: usize = 5;
/// Index of the close-time (epoch milliseconds) in a raw candle row.
const CLOSE_TIME_IDX: usize = 6;

/// One daily candle, reduced to the fields the model consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Candle close time, epoch milliseconds (UTC).
    pub close_time_ms: i64,
    /// Closing price.
    pub close: f64,
    /// Traded base-asset volume.
    pub volume: f64,
}

/// Market fetch failure.
#[derive(Debug)]
pub enum MarketError {
    /// Transport or HTTP-status failure.
    Http(Box<ureq::Error>),
    /// Response body could not be read or decoded.
    Io(io::Error),
    /// Payload did not have the expected candle-row shape.
    Malformed(String),
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "market request failed: {e}"),
            Self::Io(e) => write!(f, "market response unreadable: {e}"),
            Self::Malformed(m) => write!(f, "malformed candle payload: {m}"),
        }
    }
}

impl From<ureq::Error> for MarketError {
    fn from(e: ureq::Error) -> Self {
        Self::Http(Box::new(e))
    }
}

impl From<io::Error> for MarketError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Blocking client for the daily-candles endpoint.
#[derive(Debug, Clone)]
pub struct MarketClient {
    endpoint: String,
    timeout: Duration,
}

impl MarketClient {
    /// Builds a client from the forecast configuration.
    pub fn from_config(cfg: &ForecastConfig) -> Self {
        Self {
            endpoint: cfg.endpoint.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }

    /// Fetches up to `days` daily candles for `symbol`, oldest first.
    ///
    /// The row limit is clamped to `2..=1000` and the symbol is uppercased
    /// before the request.
    ///
    /// # Errors
    ///
    /// Returns a `MarketError` on transport failure, non-success status, or
    /// a payload that does not parse as candle rows.
    pub fn fetch_daily(&self, symbol: &str, days: usize) -> Result<Vec<Candle>, MarketError> {
        let limit = days.clamp(2, MAX_ROWS);
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .get(&self.endpoint)
            .query("symbol", &symbol.to_uppercase())
            .query("interval", "1d")
            .query("limit", &limit.to_string())
            .call()?;
        let payload: Value = response.into_json()?;
        candles_from_json(&payload)
    }
}

/// Decodes the JSON candle-row array.
///
/// The endpoint sends prices and volumes as JSON strings and timestamps as
/// numbers; both numeric encodings are accepted.
pub fn candles_from_json(payload: &Value) -> Result<Vec<Candle>, MarketError> {
    let rows = payload
        .as_array()
        .ok_or_else(|| MarketError::Malformed("expected a top-level array".to_string()))?;

    let mut candles = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let fields = row
            .as_array()
            .ok_or_else(|| MarketError::Malformed(format!("row {i} is not an array")))?;
        if fields.len() <= CLOSE_TIME_IDX {
            return Err(MarketError::Malformed(format!(
                "row {i} has {} fields, expected at least {}",
                fields.len(),
                CLOSE_TIME_IDX + 1
            )));
        }
        let close = field_as_f64(&fields[CLOSE_IDX])
            .ok_or_else(|| MarketError::Malformed(format!("row {i}: close is not numeric")))?;
        let volume = field_as_f64(&fields[VOLUME_IDX])
            .ok_or_else(|| MarketError::Malformed(format!("row {i}: volume is not numeric")))?;
        let close_time_ms = fields[CLOSE_TIME_IDX]
            .as_i64()
            .ok_or_else(|| MarketError::Malformed(format!("row {i}: close time is not an integer")))?;
        candles.push(Candle {
            close_time_ms,
            close,
            volume,
        });
    }
    Ok(candles)
}

fn field_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
