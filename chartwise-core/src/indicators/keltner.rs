//! Keltner Channel: EMA +/- ATR multiplier.
//!
//! Three bands (separate Indicator instances):
//! - Middle: EMA(close, ema_period)
//! - Upper: middle + mult * ATR(atr_period)
//! - Lower: middle - mult * ATR(atr_period)
//!
//! Lookback: max(ema_period - 1, atr_period).

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::indicators::atr::average_true_range;
use crate::rolling::ema;

/// Which band of the Keltner Channel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeltnerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Keltner {
    ema_period: usize,
    atr_period: usize,
    multiplier: f64,
    band: KeltnerBand,
}

impl Keltner {
    pub fn new(ema_period: usize, atr_period: usize, multiplier: f64, band: KeltnerBand) -> Self {
        assert!(
            ema_period >= 1 && atr_period >= 1,
            "Keltner periods must be >= 1"
        );
        Self {
            ema_period,
            atr_period,
            multiplier,
            band,
        }
    }

    pub fn upper(ema_period: usize, atr_period: usize, multiplier: f64) -> Self {
        Self::new(ema_period, atr_period, multiplier, KeltnerBand::Upper)
    }

    pub fn middle(ema_period: usize, atr_period: usize, multiplier: f64) -> Self {
        Self::new(ema_period, atr_period, multiplier, KeltnerBand::Middle)
    }

    pub fn lower(ema_period: usize, atr_period: usize, multiplier: f64) -> Self {
        Self::new(ema_period, atr_period, multiplier, KeltnerBand::Lower)
    }
}

impl Indicator for Keltner {
    fn name(&self) -> &str {
        match self.band {
            KeltnerBand::Upper => "KC_High",
            KeltnerBand::Middle => "KC_Mid",
            KeltnerBand::Lower => "KC_Low",
        }
    }

    fn lookback(&self) -> usize {
        match self.band {
            KeltnerBand::Middle => self.ema_period - 1,
            KeltnerBand::Upper | KeltnerBand::Lower => {
                (self.ema_period - 1).max(self.atr_period)
            }
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let middle = ema(&closes(bars), self.ema_period);
        if self.band == KeltnerBand::Middle {
            return middle;
        }

        let atr = average_true_range(bars, self.atr_period);
        let sign = match self.band {
            KeltnerBand::Upper => 1.0,
            _ => -1.0,
        };

        // NaN in either input propagates through the arithmetic.
        middle
            .iter()
            .zip(&atr)
            .map(|(&m, &a)| m + sign * self.multiplier * a)
            .collect()
    }
}
