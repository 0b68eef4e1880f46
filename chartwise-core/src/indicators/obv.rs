//! On-Balance Volume (OBV).
//!
//! OBV[0] = 0; OBV[t] = OBV[t-1] + volume[t] when close rises,
//! - volume[t] when it falls, unchanged otherwise.
//! Lookback: 0. An undefined close or volume ends the series.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct Obv;

impl Obv {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        "OBV"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n == 0 {
            return result;
        }

        let mut obv = 0.0;
        result[0] = obv;
        for i in 1..n {
            let (close, prev, volume) = (bars[i].close, bars[i - 1].close, bars[i].volume);
            if close.is_nan() || prev.is_nan() || volume.is_nan() {
                break;
            }
            if close > prev {
                obv += volume;
            } else if close < prev {
                obv -= volume;
            }
            result[i] = obv;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlcv_bars, DEFAULT_EPSILON};

    #[test]
    fn obv_accumulates_by_direction() {
        let bars = make_ohlcv_bars(&[
            (10.0, 10.0, 10.0, 10.0, 100.0),
            (11.0, 11.0, 11.0, 11.0, 200.0),
            (10.5, 10.5, 10.5, 10.5, 50.0),
            (10.5, 10.5, 10.5, 10.5, 75.0),
            (12.0, 12.0, 12.0, 12.0, 25.0),
        ]);
        let result = Obv::new().compute(&bars);
        let expected = [0.0, 200.0, 150.0, 150.0, 175.0];
        for (actual, expected) in result.iter().zip(expected) {
            assert_approx(*actual, expected, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn obv_empty_input() {
        assert!(Obv::new().compute(&[]).is_empty());
    }

    #[test]
    fn obv_name_and_lookback() {
        assert_eq!(Obv::new().name(), "OBV");
        assert_eq!(Obv::new().lookback(), 0);
    }
}
