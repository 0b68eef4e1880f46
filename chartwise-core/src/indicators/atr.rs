//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR uses Wilder smoothing (alpha = 1/period).
//! Lookback: period (TR needs a previous close, then `period` TR values).

use super::Indicator;
use crate::domain::Bar;
use crate::rolling::wilder_smooth;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self { period }
    }
}

/// Compute the True Range series from bars.
///
/// TR[0] is NaN: without a previous close the first bar has no true range.
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            continue;
        }
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }

    tr
}

/// Wilder-smoothed average true range over `period`.
pub fn average_true_range(bars: &[Bar], period: usize) -> Vec<f64> {
    wilder_smooth(&true_range(bars), period)
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        "ATR"
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        average_true_range(bars, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlcv_bars, DEFAULT_EPSILON};

    fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        let with_volume: Vec<_> = data
            .iter()
            .map(|&(o, h, l, c)| (o, h, l, c, 1000.0))
            .collect();
        make_ohlcv_bars(&with_volume)
    }

    #[test]
    fn true_range_basic() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0), // TR = max(8, |108-102|, |100-102|) = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = max(9, |107-106|, |98-106|) = 9
        ]);
        let tr = true_range(&bars);
        assert!(tr[0].is_nan());
        assert_approx(tr[1], 8.0, DEFAULT_EPSILON);
        assert_approx(tr[2], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        // Gap up: prev close 100, current bar 110-115-108
        let bars = make_ohlc_bars(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0), // TR = max(7, |115-100|, |108-100|) = 15
        ]);
        let tr = true_range(&bars);
        assert_approx(tr[1], 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_period_3() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0), // TR = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = 9
            (99.0, 103.0, 97.0, 101.0),   // TR = 6
            (101.0, 106.0, 100.0, 105.0), // TR = 6
        ]);
        let result = Atr::new(3).compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        // Seed: ATR[3] = mean(8, 9, 6) = 23/3
        // ATR[4] = (1/3)*6 + (2/3)*(23/3) = 64/9
        assert_approx(result[3], 23.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(result[4], 64.0 / 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_too_few_bars() {
        let bars = make_ohlc_bars(&[(100.0, 105.0, 95.0, 102.0), (102.0, 108.0, 100.0, 106.0)]);
        assert!(Atr::new(3).compute(&bars).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn atr_lookback() {
        assert_eq!(Atr::new(14).lookback(), 14);
    }
}
