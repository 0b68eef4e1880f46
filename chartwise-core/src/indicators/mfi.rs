//! Money Flow Index (MFI).
//!
//! Volume-weighted RSI over typical-price flows:
//! raw flow[t] = TP[t] * volume[t], positive when TP rises, negative when it
//! falls, neither when it is unchanged.
//! MFI = 100 * posFlow / (posFlow + negFlow) summed over `period` flows.
//!
//! Lookback: period (a flow needs the previous typical price).
//! Edge case: no flow at all → 0.

use super::Indicator;
use crate::domain::Bar;
use crate::rolling::rolling_sum;

#[derive(Debug, Clone)]
pub struct Mfi {
    period: usize,
}

impl Mfi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "MFI period must be >= 1");
        Self { period }
    }
}

impl Indicator for Mfi {
    fn name(&self) -> &str {
        "MFI"
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut positive = vec![f64::NAN; n];
        let mut negative = vec![f64::NAN; n];

        for i in 1..n {
            let tp = bars[i].typical_price();
            let prev_tp = bars[i - 1].typical_price();
            let flow = tp * bars[i].volume;
            if tp.is_nan() || prev_tp.is_nan() || flow.is_nan() {
                continue;
            }
            positive[i] = if tp > prev_tp { flow } else { 0.0 };
            negative[i] = if tp < prev_tp { flow } else { 0.0 };
        }

        let pos_sum = rolling_sum(&positive, self.period);
        let neg_sum = rolling_sum(&negative, self.period);

        pos_sum
            .iter()
            .zip(&neg_sum)
            .map(|(&pos, &neg)| {
                if pos.is_nan() || neg.is_nan() {
                    f64::NAN
                } else if pos + neg == 0.0 {
                    0.0
                } else {
                    100.0 * pos / (pos + neg)
                }
            })
            .collect()
    }
}
