//! Accumulation/Distribution line.
//!
//! CLV = ((close - low) - (high - close)) / (high - low), 0 when high == low.
//! AD[t] = AD[t-1] + CLV[t] * volume[t], starting from the first bar.
//! Lookback: 0. An undefined input ends the series.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct AccumulationDistribution;

impl AccumulationDistribution {
    pub fn new() -> Self {
        Self
    }
}

/// Close location value of a single bar, in [-1, 1].
fn close_location_value(bar: &Bar) -> f64 {
    let range = bar.high - bar.low;
    if range == 0.0 {
        0.0
    } else {
        ((bar.close - bar.low) - (bar.high - bar.close)) / range
    }
}

impl Indicator for AccumulationDistribution {
    fn name(&self) -> &str {
        "AD"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut result = vec![f64::NAN; bars.len()];
        let mut ad = 0.0;

        for (i, bar) in bars.iter().enumerate() {
            let flow = close_location_value(bar) * bar.volume;
            if flow.is_nan() {
                break;
            }
            ad += flow;
            result[i] = ad;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlcv_bars, DEFAULT_EPSILON};

    #[test]
    fn ad_accumulates_clv_times_volume() {
        let bars = make_ohlcv_bars(&[
            (10.0, 12.0, 8.0, 12.0, 100.0),  // CLV 1
            (11.0, 12.0, 8.0, 8.0, 50.0),    // CLV -1
            (10.0, 12.0, 8.0, 10.0, 300.0),  // CLV 0
            (10.0, 12.0, 8.0, 11.0, 200.0),  // CLV 0.5
        ]);
        let result = AccumulationDistribution::new().compute(&bars);
        let expected = [100.0, 50.0, 50.0, 150.0];
        for (actual, expected) in result.iter().zip(expected) {
            assert_approx(*actual, expected, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn zero_range_bar_adds_nothing() {
        let bars = make_ohlcv_bars(&[(10.0, 10.0, 10.0, 10.0, 100.0)]);
        assert_eq!(AccumulationDistribution::new().compute(&bars), vec![0.0]);
    }

    #[test]
    fn nan_ends_series() {
        let mut bars = make_ohlcv_bars(&[
            (10.0, 12.0, 8.0, 12.0, 100.0),
            (11.0, 12.0, 8.0, 8.0, 50.0),
            (10.0, 12.0, 8.0, 10.0, 300.0),
        ]);
        bars[1].close = f64::NAN;
        let result = AccumulationDistribution::new().compute(&bars);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
    }

    #[test]
    fn ad_name() {
        assert_eq!(AccumulationDistribution::new().name(), "AD");
    }
}
