//! Momentum: price difference over a lookback (not a percentage).
//!
//! momentum[t] = close[t] - close[t-period]
//! Lookback: period.

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::rolling::lag;

#[derive(Debug, Clone)]
pub struct Momentum {
    period: usize,
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Momentum period must be >= 1");
        Self { period }
    }
}

impl Indicator for Momentum {
    fn name(&self) -> &str {
        "Momentum"
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes = closes(bars);
        let reference = lag(&closes, self.period);
        closes.iter().zip(&reference).map(|(c, p)| c - p).collect()
    }
}
