//! MACD: Moving Average Convergence Divergence.
//!
//! Three lines (separate Indicator instances):
//! - MACD: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(MACD, signal)
//! - Histogram: MACD - Signal
//!
//! Lookback: slow - 1 for the MACD line, slow + signal - 2 for signal/histogram.

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::rolling::ema;

/// Which MACD output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Macd,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(slow > fast, "MACD slow period must be > fast period");
        Self {
            fast,
            slow,
            signal,
            line,
        }
    }
}

/// All three MACD lines at once: (macd, signal, histogram).
pub fn macd_lines(
    bars: &[Bar],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let closes = closes(bars);
    let fast_ema = ema(&closes, fast);
    let slow_ema = ema(&closes, slow);

    let macd: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&macd, signal);
    let histogram = macd.iter().zip(&signal_line).map(|(m, s)| m - s).collect();

    (macd, signal_line, histogram)
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        match self.line {
            MacdLine::Macd => "MACD",
            MacdLine::Signal => "MACD_Signal",
            MacdLine::Histogram => "MACD_Diff",
        }
    }

    fn lookback(&self) -> usize {
        match self.line {
            MacdLine::Macd => self.slow - 1,
            MacdLine::Signal | MacdLine::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (macd, signal, histogram) = macd_lines(bars, self.fast, self.slow, self.signal);
        match self.line {
            MacdLine::Macd => macd,
            MacdLine::Signal => signal,
            MacdLine::Histogram => histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn wave(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + (i as f64 * 0.3).sin() * 8.0).collect()
    }

    #[test]
    fn histogram_is_macd_minus_signal() {
        let bars = make_bars(&wave(80));
        let (macd, signal, hist) = macd_lines(&bars, 12, 26, 9);
        for i in 0..bars.len() {
            if hist[i].is_nan() {
                continue;
            }
            assert_eq!(hist[i], macd[i] - signal[i], "histogram mismatch at {i}");
        }
    }

    #[test]
    fn warmup_lengths() {
        let bars = make_bars(&wave(60));
        let macd = Macd::new(12, 26, 9, MacdLine::Macd);
        let signal = Macd::new(12, 26, 9, MacdLine::Signal);

        let m = macd.compute(&bars);
        let s = signal.compute(&bars);
        assert!(m[24].is_nan());
        assert!(!m[25].is_nan());
        assert!(s[32].is_nan());
        assert!(!s[33].is_nan());
        assert_eq!(macd.lookback(), 25);
        assert_eq!(signal.lookback(), 33);
    }

    #[test]
    fn rising_prices_give_positive_macd() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let result = Macd::new(12, 26, 9, MacdLine::Macd).compute(&bars);
        assert!(result[59] > 0.0);
    }

    #[test]
    fn too_few_bars_all_nan() {
        let bars = make_bars(&wave(10));
        let result = Macd::new(12, 26, 9, MacdLine::Signal).compute(&bars);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
