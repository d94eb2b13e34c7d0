//! Scaled linear regression with a time-ordered split and naïve baseline.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use super::features::{FEATURE_COUNT, FeatureSet};

/// Model fitting or data-shape failure.
#[derive(Debug)]
pub enum ModelError {
    /// Too few feature rows to form the requested train/test split.
    NotEnoughData {
        /// Rows available.
        rows: usize,
    },
    /// The least-squares solve failed.
    Fit(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughData { rows } => {
                write!(f, "not enough feature rows to train and evaluate: {rows}")
            }
            Self::Fit(m) => write!(f, "least-squares fit failed: {m}"),
        }
    }
}

/// Per-column standardization fitted on the training slice only.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: [f64; FEATURE_COUNT],
    stds: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Fits means and (population) standard deviations per column.
    ///
    /// A zero-variance column scales by 1.0 so constant features pass
    /// through centered instead of dividing by zero.
    pub fn fit(rows: &[[f64; FEATURE_COUNT]]) -> Self {
        let n = rows.len() as f64;
        let mut means = [0.0; FEATURE_COUNT];
        let mut stds = [0.0; FEATURE_COUNT];
        for row in rows {
            for (c, v) in row.iter().enumerate() {
                means[c] += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }
        for row in rows {
            for (c, v) in row.iter().enumerate() {
                let d = v - means[c];
                stds[c] += d * d;
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }
        Self { means, stds }
    }

    /// Standardizes one feature row.
    pub fn transform(&self, row: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for c in 0..FEATURE_COUNT {
            out[c] = (row[c] - self.means[c]) / self.stds[c];
        }
        out
    }
}

/// Standard scaler + ordinary-least-squares regression with intercept.
#[derive(Debug, Clone)]
pub struct PriceModel {
    scaler: StandardScaler,
    /// Intercept followed by one coefficient per scaled feature.
    weights: Vec<f64>,
}

impl PriceModel {
    /// Fits the scaler and the OLS coefficients on the given rows.
    ///
    /// The normal equations are solved through an SVD so collinear feature
    /// columns degrade to a minimum-norm solution instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Fit` if the SVD solve fails.
    pub fn fit(rows: &[[f64; FEATURE_COUNT]], targets: &[f64]) -> Result<Self, ModelError> {
        let scaler = StandardScaler::fit(rows);
        let scaled: Vec<[f64; FEATURE_COUNT]> = rows.iter().map(|r| scaler.transform(r)).collect();

        let m = scaled.len();
        let design = DMatrix::from_fn(m, FEATURE_COUNT + 1, |r, c| {
            if c == 0 { 1.0 } else { scaled[r][c - 1] }
        });
        let y = DVector::from_column_slice(targets);

        let svd = design.svd(true, true);
        let w = svd
            .solve(&y, 1e-12)
            .map_err(|e| ModelError::Fit(e.to_string()))?;

        Ok(Self {
            scaler,
            weights: w.iter().copied().collect(),
        })
    }

    /// Predicts the target for one raw (unscaled) feature row.
    pub fn predict(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        let scaled = self.scaler.transform(row);
        let mut acc = self.weights[0];
        for (c, v) in scaled.iter().enumerate() {
            acc += self.weights[c + 1] * v;
        }
        acc
    }
}

/// Root-mean-square error between actual and predicted values.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len() as f64;
    let sq: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    (sq / n).sqrt()
}

/// Mean absolute error between actual and predicted values.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len() as f64;
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n
}

/// Evaluation of a fitted model over the held-out test window.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Training rows used.
    pub train_len: usize,
    /// Test rows held out.
    pub test_len: usize,
    /// RMSE over the training window.
    pub train_rmse: f64,
    /// RMSE over the test window.
    pub test_rmse: f64,
    /// MAE over the test window.
    pub test_mae: f64,
    /// RMSE of the "tomorrow equals today" baseline on the test window.
    pub naive_rmse: f64,
    /// `naive_rmse - test_rmse`; positive means the model beats the baseline.
    pub rmse_lift: f64,
    /// Share of test days where the up/down direction was called correctly.
    pub direction_accuracy_pct: f64,
    /// Actual test-window targets, in time order.
    pub actual_test: Vec<f64>,
    /// Model predictions for the test window, in time order.
    pub predicted_test: Vec<f64>,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Model Evaluation ---")?;
        writeln!(f, "Train/test rows:     {}/{}", self.train_len, self.test_len)?;
        writeln!(f, "Training RMSE:       {:.2}", self.train_rmse)?;
        writeln!(f, "Test RMSE:           {:.2}", self.test_rmse)?;
        writeln!(f, "Test MAE:            {:.2}", self.test_mae)?;
        writeln!(
            f,
            "Naive RMSE:          {:.2} (lift {:.2})",
            self.naive_rmse, self.rmse_lift
        )?;
        write!(
            f,
            "Direction accuracy:  {:.1}%",
            self.direction_accuracy_pct
        )
    }
}

/// Fits on the earliest `train_ratio` share of rows and evaluates on the rest.
///
/// The split is strictly time-ordered (no shuffling); the scaler is fitted
/// on the training slice only. The naïve baseline predicts each test target
/// as the previous test-window target, with the first test day falling back
/// to its own value.
///
/// # Errors
///
/// Returns `ModelError::NotEnoughData` when either side of the split would
/// have fewer than two rows, or `ModelError::Fit` on solver failure.
pub fn train_and_evaluate(
    set: &FeatureSet,
    train_ratio: f64,
) -> Result<(PriceModel, Evaluation), ModelError> {
    let n = set.len();
    let split = (n as f64 * train_ratio) as usize;
    if split < 2 || n - split < 2 {
        return Err(ModelError::NotEnoughData { rows: n });
    }

    let (x_train, x_test) = set.rows.split_at(split);
    let (y_train, y_test) = set.targets.split_at(split);

    let model = PriceModel::fit(x_train, y_train)?;

    let yhat_train: Vec<f64> = x_train.iter().map(|r| model.predict(r)).collect();
    let yhat_test: Vec<f64> = x_test.iter().map(|r| model.predict(r)).collect();

    // Baseline and "today's price" series: previous actual, backfilled at the start.
    let today: Vec<f64> = (0..y_test.len())
        .map(|i| if i == 0 { y_test[0] } else { y_test[i - 1] })
        .collect();

    let naive_rmse = rmse(y_test, &today);
    let test_rmse = rmse(y_test, &yhat_test);

    let correct = y_test
        .iter()
        .zip(&yhat_test)
        .zip(&today)
        .filter(|((actual, predicted), today)| (*actual > *today) == (*predicted > *today))
        .count();

    let evaluation = Evaluation {
        train_len: split,
        test_len: n - split,
        train_rmse: rmse(y_train, &yhat_train),
        test_rmse,
        test_mae: mae(y_test, &yhat_test),
        naive_rmse,
        rmse_lift: naive_rmse - test_rmse,
        direction_accuracy_pct: 100.0 * correct as f64 / y_test.len() as f64,
        actual_test: y_test.to_vec(),
        predicted_test: yhat_test,
    };
    Ok((model, evaluation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::features;
    use crate::forecast::market::Candle;

    fn linear_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle {
                close_time_ms: i as i64 * 86_400_000,
                close: 100.0 + i as f64,
                volume: 100.0,
            })
            .collect()
    }

    #[test]
    fn rmse_and_mae_basics() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [2.0, 1.0, 5.0, 2.0];
        // errors: 1, 1, 2, 2 -> mae 1.5, rmse sqrt(10/4)
        assert!((mae(&actual, &predicted) - 1.5).abs() < 1e-12);
        assert!((rmse(&actual, &predicted) - (10.0_f64 / 4.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn scaler_centers_and_scales() {
        let rows = [[0.0; 6], [2.0; 6]];
        let scaler = StandardScaler::fit(&rows);
        let t = scaler.transform(&[2.0; 6]);
        // mean 1, population std 1 -> (2 - 1) / 1 = 1
        assert!(t.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn scaler_handles_constant_columns() {
        let rows = [[5.0; 6], [5.0; 6], [5.0; 6]];
        let scaler = StandardScaler::fit(&rows);
        let t = scaler.transform(&[5.0; 6]);
        assert!(t.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn fits_a_linear_trend_closely() {
        let set = features::build(&linear_candles(60));
        let (model, eval) = train_and_evaluate(&set, 0.8).expect("enough data");
        // A price rising by exactly 1/day is linear in lag_1; test error
        // should be near zero and far below the naive baseline.
        assert!(eval.test_rmse < 0.5, "test rmse {}", eval.test_rmse);
        assert!(eval.rmse_lift > 0.0);

        let last = set.rows.last().expect("nonempty");
        let next = model.predict(last);
        let expected = set.targets.last().expect("nonempty") + 1.0;
        assert!((next - expected).abs() < 1.0, "next {next} vs {expected}");
    }

    #[test]
    fn split_is_time_ordered() {
        let set = features::build(&linear_candles(40));
        let (_, eval) = train_and_evaluate(&set, 0.8).expect("enough data");
        assert_eq!(eval.train_len + eval.test_len, set.len());
        // test window holds the latest (largest) targets
        let max_target = set.targets.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(*eval.actual_test.last().expect("nonempty"), max_target);
    }

    #[test]
    fn too_small_sets_are_rejected() {
        let set = features::build(&linear_candles(10));
        let err = train_and_evaluate(&set, 0.8);
        assert!(matches!(err, Err(ModelError::NotEnoughData { .. })));
    }

    #[test]
    fn naive_baseline_on_constant_series_is_zero_error() {
        let mut set = features::build(&linear_candles(40));
        for t in &mut set.targets {
            *t = 500.0;
        }
        let (_, eval) = train_and_evaluate(&set, 0.8).expect("enough data");
        assert!(eval.naive_rmse.abs() < 1e-9);
    }
}
