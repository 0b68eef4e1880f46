//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 * avg_gain / (avg_gain + avg_loss), i.e. 100 - 100 / (1 + RS).
//! Lookback: period.
//! Edge cases: avg_loss == 0 → RSI = 100; no movement at all → RSI = 50.

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::rolling::wilder_smooth;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        "RSI"
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes = closes(bars);
        let n = closes.len();

        let mut gains = vec![f64::NAN; n];
        let mut losses = vec![f64::NAN; n];
        for i in 1..n {
            let change = closes[i] - closes[i - 1];
            if change.is_nan() {
                continue;
            }
            gains[i] = change.max(0.0);
            losses[i] = (-change).max(0.0);
        }

        let avg_gain = wilder_smooth(&gains, self.period);
        let avg_loss = wilder_smooth(&losses, self.period);

        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&g, &l)| rsi_from_averages(g, l))
            .collect()
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        return f64::NAN;
    }
    let total = avg_gain + avg_loss;
    if total == 0.0 {
        50.0 // no movement
    } else {
        100.0 * avg_gain / total
    }
}
