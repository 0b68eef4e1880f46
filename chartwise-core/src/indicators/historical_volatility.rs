//! Historical volatility.
//!
//! Population standard deviation of the last `window` simple close-to-close
//! returns, expressed in percent. Not annualized.
//! Lookback: window. A zero reference close makes its return undefined.

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::rolling::rolling_std;

#[derive(Debug, Clone)]
pub struct HistoricalVolatility {
    window: usize,
}

impl HistoricalVolatility {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "historical volatility window must be >= 1");
        Self { window }
    }
}

/// Simple returns; index 0 is undefined.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
    let mut returns = vec![f64::NAN; closes.len()];
    for i in 1..closes.len() {
        let prev = closes[i - 1];
        if prev != 0.0 {
            returns[i] = (closes[i] - prev) / prev;
        }
    }
    returns
}

impl Indicator for HistoricalVolatility {
    fn name(&self) -> &str {
        "HV"
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        rolling_std(&simple_returns(&closes(bars)), self.window)
            .into_iter()
            .map(|sd| sd * 100.0)
            .collect()
    }
}
