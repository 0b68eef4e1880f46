//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a lookback window.
//! Lookback: period - 1 (first valid value at index period-1).

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::rolling::rolling_mean;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("SMA_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        rolling_mean(&closes(bars), self.period)
    }
}
