//! Williams %R.
//!
//! %R[t] = -100 * (HH - close[t]) / (HH - LL) over the last `period` bars.
//! Range: [-100, 0]. Edge case: HH == LL → -50.
//! Lookback: period - 1.

use super::{closes, highs, lows, Indicator};
use crate::domain::Bar;
use crate::rolling::{rolling_max, rolling_min};

#[derive(Debug, Clone)]
pub struct WilliamsR {
    period: usize,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Williams %R period must be >= 1");
        Self { period }
    }
}

impl Indicator for WilliamsR {
    fn name(&self) -> &str {
        "Williams_R"
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let hh = rolling_max(&highs(bars), self.period);
        let ll = rolling_min(&lows(bars), self.period);

        closes(bars)
            .iter()
            .zip(hh.iter().zip(&ll))
            .map(|(&close, (&high, &low))| {
                if close.is_nan() || high.is_nan() || low.is_nan() {
                    f64::NAN
                } else if high == low {
                    -50.0
                } else {
                    -100.0 * (high - close) / (high - low)
                }
            })
            .collect()
    }
}
