//! Feature engineering over daily candles.
//!
//! A deliberately small feature set: yesterday's price, a 7-day moving
//! average and the price's stretch against it, the daily return, 7-day
//! return volatility, and today's volume against its 7-day average. The
//! target is the next day's close. Rows whose rolling windows are
//! incomplete are dropped, as is the final row (it has no target).

use super::market::Candle;

/// Rolling window length shared by the moving-average features.
pub const WINDOW: usize = 7;

/// Number of features per row.
pub const FEATURE_COUNT: usize = 6;

/// Feature column names, in row order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "lag_1",
    "ma7",
    "price_vs_ma7",
    "ret_1d",
    "vol_7d",
    "volume_ratio",
];

/// Aligned feature rows, targets, and candle close times.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    /// One feature vector per retained candle.
    pub rows: Vec<[f64; FEATURE_COUNT]>,
    /// Next-day close for each retained candle.
    pub targets: Vec<f64>,
    /// Close time (epoch ms) of each retained candle.
    pub close_times_ms: Vec<i64>,
}

impl FeatureSet {
    /// Number of retained rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows survived the window/target cuts.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the feature set from candles in chronological order.
///
/// The first valid row needs a full window of daily returns (so `WINDOW`
/// prior candles plus one more for the first return) and the last candle is
/// dropped for lack of a target; fewer than `WINDOW + 2` candles yield an
/// empty set.
pub fn build(candles: &[Candle]) -> FeatureSet {
    let n = candles.len();
    let mut set = FeatureSet::default();
    if n < WINDOW + 2 {
        return set;
    }

    let prices: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

    // ret[i] is the day-over-day return ending at candle i; undefined for i = 0.
    let returns: Vec<f64> = (0..n)
        .map(|i| {
            if i == 0 {
                f64::NAN
            } else {
                prices[i] / prices[i - 1] - 1.0
            }
        })
        .collect();

    for i in WINDOW..n - 1 {
        let lag_1 = prices[i - 1];
        let ma7 = mean(&prices[i + 1 - WINDOW..=i]);
        let price_vs_ma7 = prices[i] / ma7;
        let ret_1d = returns[i];
        let vol_7d = sample_std(&returns[i + 1 - WINDOW..=i]);
        let vol_avg_7 = mean(&volumes[i + 1 - WINDOW..=i]);
        let volume_ratio = volumes[i] / vol_avg_7;

        set.rows
            .push([lag_1, ma7, price_vs_ma7, ret_1d, vol_7d, volume_ratio]);
        set.targets.push(prices[i + 1]);
        set.close_times_ms.push(candles[i].close_time_ms);
    }
    set
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}
