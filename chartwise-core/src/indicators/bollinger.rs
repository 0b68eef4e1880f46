//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! Four outputs (separate Indicator instances):
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//! - Width: (upper - lower) / middle * 100, or 0 when middle is 0
//!
//! Uses population stddev (divide by N).
//! Lookback: period - 1.

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::rolling::{rolling_mean, rolling_std};

/// Which output of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
    Width,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            band,
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Lower)
    }

    pub fn width(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Width)
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        match self.band {
            BollingerBand::Upper => "BB_High",
            BollingerBand::Middle => "BB_Mid",
            BollingerBand::Lower => "BB_Low",
            BollingerBand::Width => "BB_Width",
        }
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes = closes(bars);
        let mean = rolling_mean(&closes, self.period);
        if self.band == BollingerBand::Middle {
            return mean;
        }

        let std = rolling_std(&closes, self.period);
        mean.iter()
            .zip(&std)
            .map(|(&mid, &sd)| {
                let upper = mid + self.multiplier * sd;
                let lower = mid - self.multiplier * sd;
                match self.band {
                    BollingerBand::Upper => upper,
                    BollingerBand::Lower => lower,
                    BollingerBand::Middle => mid,
                    BollingerBand::Width => {
                        if mid.is_nan() || sd.is_nan() {
                            f64::NAN
                        } else if mid == 0.0 {
                            0.0
                        } else {
                            (upper - lower) / mid * 100.0
                        }
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let result = Bollinger::middle(3, 2.0).compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let upper = Bollinger::upper(3, 2.0).compute(&bars);
        let middle = Bollinger::middle(3, 2.0).compute(&bars);
        let lower = Bollinger::lower(3, 2.0).compute(&bars);

        for i in 2..5 {
            let half_width = upper[i] - middle[i];
            assert_approx(middle[i] - lower[i], half_width, DEFAULT_EPSILON);
            assert!(upper[i] >= middle[i] && middle[i] >= lower[i]);
        }
    }

    #[test]
    fn bollinger_width_known_value() {
        // window [10, 11, 12]: mid 11, population std sqrt(2/3)
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let width = Bollinger::width(3, 2.0).compute(&bars);
        let expected = 4.0 * (2.0f64 / 3.0).sqrt() / 11.0 * 100.0;
        assert_approx(width[2], expected, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let upper = Bollinger::upper(3, 2.0).compute(&bars);
        let lower = Bollinger::lower(3, 2.0).compute(&bars);
        let width = Bollinger::width(3, 2.0).compute(&bars);

        assert_approx(upper[2], 100.0, DEFAULT_EPSILON);
        assert_approx(lower[2], 100.0, DEFAULT_EPSILON);
        assert_approx(width[2], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_width_zero_mid_is_zero() {
        let bars = make_bars(&[1.0, -1.0, 0.0]);
        let width = Bollinger::width(3, 2.0).compute(&bars);
        assert_eq!(width[2], 0.0);
    }

    #[test]
    fn bollinger_nan_propagation() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        bars[2].close = f64::NAN;
        let result = Bollinger::upper(3, 2.0).compute(&bars);
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
    }

    #[test]
    fn bollinger_names_and_lookback() {
        assert_eq!(Bollinger::upper(20, 2.0).name(), "BB_High");
        assert_eq!(Bollinger::width(20, 2.0).name(), "BB_Width");
        assert_eq!(Bollinger::upper(20, 2.0).lookback(), 19);
    }
}
