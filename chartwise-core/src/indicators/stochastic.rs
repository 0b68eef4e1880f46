//! Stochastic Oscillator.
//!
//! raw %K[t] = 100 * (close[t] - LL) / (HH - LL) over the last `window` bars,
//! 50 when HH == LL.
//! %K = SMA(raw %K, smooth_k); %D = SMA(%K, smooth_d).
//!
//! Lookback: window + smooth_k - 2 for %K, window + smooth_k + smooth_d - 3 for %D.

use super::{closes, highs, lows, Indicator};
use crate::domain::Bar;
use crate::rolling::{rolling_max, rolling_mean, rolling_min};

/// Which stochastic line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    window: usize,
    smooth_k: usize,
    smooth_d: usize,
    line: StochasticLine,
}

impl Stochastic {
    pub fn new(window: usize, smooth_k: usize, smooth_d: usize, line: StochasticLine) -> Self {
        assert!(
            window >= 1 && smooth_k >= 1 && smooth_d >= 1,
            "Stochastic periods must be >= 1"
        );
        Self {
            window,
            smooth_k,
            smooth_d,
            line,
        }
    }
}

/// Unsmoothed %K over `window` bars.
pub fn raw_percent_k(bars: &[Bar], window: usize) -> Vec<f64> {
    let hh = rolling_max(&highs(bars), window);
    let ll = rolling_min(&lows(bars), window);

    closes(bars)
        .iter()
        .zip(hh.iter().zip(&ll))
        .map(|(&close, (&high, &low))| {
            if close.is_nan() || high.is_nan() || low.is_nan() {
                f64::NAN
            } else if high == low {
                50.0
            } else {
                100.0 * (close - low) / (high - low)
            }
        })
        .collect()
}

/// Both stochastic lines at once: (%K, %D).
pub fn stochastic_lines(
    bars: &[Bar],
    window: usize,
    smooth_k: usize,
    smooth_d: usize,
) -> (Vec<f64>, Vec<f64>) {
    let k = rolling_mean(&raw_percent_k(bars, window), smooth_k);
    let d = rolling_mean(&k, smooth_d);
    (k, d)
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        match self.line {
            StochasticLine::K => "Stoch_K",
            StochasticLine::D => "Stoch_D",
        }
    }

    fn lookback(&self) -> usize {
        match self.line {
            StochasticLine::K => self.window + self.smooth_k - 2,
            StochasticLine::D => self.window + self.smooth_k + self.smooth_d - 3,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (k, d) = stochastic_lines(bars, self.window, self.smooth_k, self.smooth_d);
        match self.line {
            StochasticLine::K => k,
            StochasticLine::D => d,
        }
    }
}
