//! Supertrend: ATR-based directional indicator.
//!
//! Bands are the basic `hl2 ± multiplier·ATR` of each bar. The trend is up
//! only while the close sits above the upper band; anything else is down.
//! Each bar is classified on its own, so there is no assumed starting trend.
//!
//! Two lines (separate Indicator instances):
//! - Value: the active band, lower band (support) when trending up,
//!   upper band (resistance) when trending down
//! - Direction: +1 when trending up, -1 when trending down
//!
//! Lookback: period (same as ATR lookback since it depends on ATR).

use super::Indicator;
use crate::domain::Bar;
use crate::indicators::atr::average_true_range;

/// Which Supertrend output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupertrendLine {
    Value,
    Direction,
}

#[derive(Debug, Clone)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
    line: SupertrendLine,
}

impl Supertrend {
    pub fn new(period: usize, multiplier: f64, line: SupertrendLine) -> Self {
        assert!(period >= 1, "Supertrend period must be >= 1");
        Self {
            period,
            multiplier,
            line,
        }
    }
}

/// Both Supertrend outputs at once: (value, direction).
pub fn supertrend_lines(bars: &[Bar], period: usize, multiplier: f64) -> (Vec<f64>, Vec<f64>) {
    let n = bars.len();
    let mut value = vec![f64::NAN; n];
    let mut direction = vec![f64::NAN; n];

    let atr = average_true_range(bars, period);

    for (i, bar) in bars.iter().enumerate() {
        let hl2 = bar.hl2();
        if atr[i].is_nan() || hl2.is_nan() || bar.close.is_nan() {
            continue;
        }

        let upper_band = hl2 + multiplier * atr[i];
        let lower_band = hl2 - multiplier * atr[i];

        if bar.close > upper_band {
            value[i] = lower_band;
            direction[i] = 1.0;
        } else {
            value[i] = upper_band;
            direction[i] = -1.0;
        }
    }

    (value, direction)
}

impl Indicator for Supertrend {
    fn name(&self) -> &str {
        match self.line {
            SupertrendLine::Value => "Supertrend",
            SupertrendLine::Direction => "Supertrend_Dir",
        }
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (value, direction) = supertrend_lines(bars, self.period, self.multiplier);
        match self.line {
            SupertrendLine::Value => value,
            SupertrendLine::Direction => direction,
        }
    }
}
