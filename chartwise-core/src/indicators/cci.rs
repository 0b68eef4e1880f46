//! Commodity Channel Index (CCI).
//!
//! TP = (high + low + close) / 3
//! CCI = (TP - SMA(TP, period)) / (0.015 * meanAbsDev(TP, period))
//! Lookback: period - 1. Edge case: zero mean deviation → 0.

use super::Indicator;
use crate::domain::Bar;
use crate::rolling::{rolling_mean, rolling_mean_abs_deviation};

const LAMBERT_CONSTANT: f64 = 0.015;

#[derive(Debug, Clone)]
pub struct Cci {
    period: usize,
}

impl Cci {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CCI period must be >= 1");
        Self { period }
    }
}

impl Indicator for Cci {
    fn name(&self) -> &str {
        "CCI"
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let tp: Vec<f64> = bars.iter().map(Bar::typical_price).collect();
        let mean = rolling_mean(&tp, self.period);
        let mad = rolling_mean_abs_deviation(&tp, self.period);

        tp.iter()
            .zip(mean.iter().zip(&mad))
            .map(|(&tp, (&mean, &mad))| {
                if mean.is_nan() || mad.is_nan() {
                    f64::NAN
                } else if mad == 0.0 {
                    0.0
                } else {
                    (tp - mean) / (LAMBERT_CONSTANT * mad)
                }
            })
            .collect()
    }
}
