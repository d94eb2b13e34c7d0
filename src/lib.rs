//! Building energy engineering toolkit: interactive calculators with a
//! persisted report and usage log, portfolio analysis, and a daily-candle
//! price forecaster.

pub mod calc;
pub mod config;
pub mod forecast;
pub mod input;
pub mod menu;
pub mod portfolio;
pub mod report;
#[cfg(feature = "tui")]
pub mod tui;
pub mod units;
pub mod usage_log;
