//! ADX: Average Directional Index (Wilder).
//!
//! Steps:
//! 1. Compute +DM and -DM from consecutive bars
//! 2. Smooth +DM, -DM, and TR using Wilder smoothing (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR)
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. ADX = Wilder-smoothed DX
//!
//! Three lines (separate Indicator instances): ADX, ADX_Pos (+DI), ADX_Neg (-DI).
//! Lookback: period for the DI lines, 2 * period - 1 for ADX.
//! Edge cases: smoothed TR == 0 → both DI = 0; DI sum == 0 → DX = 0.

use super::Indicator;
use crate::domain::Bar;
use crate::indicators::atr::true_range;
use crate::rolling::wilder_smooth;

/// Which ADX output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdxLine {
    Adx,
    PlusDi,
    MinusDi,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    line: AdxLine,
}

impl Adx {
    pub fn new(period: usize, line: AdxLine) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self { period, line }
    }
}

/// Directional components: (adx, plus_di, minus_di).
pub fn adx_components(bars: &[Bar], period: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n = bars.len();

    // +DM[0] and -DM[0] stay NaN, matching TR[0], so all three seeds align.
    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];

    for i in 1..n {
        let high_diff = bars[i].high - bars[i - 1].high;
        let low_diff = bars[i - 1].low - bars[i].low;

        if high_diff.is_nan() || low_diff.is_nan() {
            continue;
        }

        plus_dm[i] = if high_diff > low_diff && high_diff > 0.0 {
            high_diff
        } else {
            0.0
        };
        minus_dm[i] = if low_diff > high_diff && low_diff > 0.0 {
            low_diff
        } else {
            0.0
        };
    }

    let smooth_tr = wilder_smooth(&true_range(bars), period);
    let smooth_plus_dm = wilder_smooth(&plus_dm, period);
    let smooth_minus_dm = wilder_smooth(&minus_dm, period);

    let mut plus_di = vec![f64::NAN; n];
    let mut minus_di = vec![f64::NAN; n];
    let mut dx = vec![f64::NAN; n];

    for i in 0..n {
        let tr = smooth_tr[i];
        let pdm = smooth_plus_dm[i];
        let mdm = smooth_minus_dm[i];
        if tr.is_nan() || pdm.is_nan() || mdm.is_nan() {
            continue;
        }

        let (pdi, mdi) = if tr == 0.0 {
            (0.0, 0.0)
        } else {
            (100.0 * pdm / tr, 100.0 * mdm / tr)
        };
        plus_di[i] = pdi;
        minus_di[i] = mdi;

        let di_sum = pdi + mdi;
        dx[i] = if di_sum == 0.0 {
            0.0
        } else {
            100.0 * (pdi - mdi).abs() / di_sum
        };
    }

    let adx = wilder_smooth(&dx, period);
    (adx, plus_di, minus_di)
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        match self.line {
            AdxLine::Adx => "ADX",
            AdxLine::PlusDi => "ADX_Pos",
            AdxLine::MinusDi => "ADX_Neg",
        }
    }

    fn lookback(&self) -> usize {
        match self.line {
            AdxLine::Adx => 2 * self.period - 1,
            AdxLine::PlusDi | AdxLine::MinusDi => self.period,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (adx, plus_di, minus_di) = adx_components(bars, self.period);
        match self.line {
            AdxLine::Adx => adx,
            AdxLine::PlusDi => plus_di,
            AdxLine::MinusDi => minus_di,
        }
    }
}
