//! Rate of Change (ROC).
//!
//! Percentage price change over N bars.
//! ROC[t] = (close[t] - close[t-period]) / close[t-period] * 100
//! Lookback: period.
//! Edge case: a zero reference close gives 0.

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::rolling::lag;

#[derive(Debug, Clone)]
pub struct Roc {
    period: usize,
}

impl Roc {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ROC period must be >= 1");
        Self { period }
    }
}

impl Indicator for Roc {
    fn name(&self) -> &str {
        "ROC"
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes = closes(bars);
        let reference = lag(&closes, self.period);

        closes
            .iter()
            .zip(&reference)
            .map(|(&curr, &prev)| {
                if prev.is_nan() || curr.is_nan() {
                    f64::NAN
                } else if prev == 0.0 {
                    0.0
                } else {
                    (curr - prev) / prev * 100.0
                }
            })
            .collect()
    }
}
