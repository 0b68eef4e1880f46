//! Donchian Channel: highest high / lowest low over a lookback window.
//!
//! Produces two series (exposed as separate Indicator instances):
//! - Upper: max(high[t-period+1..=t])
//! - Lower: min(low[t-period+1..=t])
//!
//! Lookback: period - 1.

use super::{highs, lows, Indicator};
use crate::domain::Bar;
use crate::rolling::{rolling_max, rolling_min};

/// Which band of the Donchian channel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonchianBand {
    Upper,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Donchian {
    period: usize,
    band: DonchianBand,
}

impl Donchian {
    pub fn upper(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        Self {
            period,
            band: DonchianBand::Upper,
        }
    }

    pub fn lower(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        Self {
            period,
            band: DonchianBand::Lower,
        }
    }
}

impl Indicator for Donchian {
    fn name(&self) -> &str {
        match self.band {
            DonchianBand::Upper => "DC_High",
            DonchianBand::Lower => "DC_Low",
        }
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        match self.band {
            DonchianBand::Upper => rolling_max(&highs(bars), self.period),
            DonchianBand::Lower => rolling_min(&lows(bars), self.period),
        }
    }
}
