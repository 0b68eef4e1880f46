//! Indicator library.
//!
//! Every indicator is a pure function from a bar slice to one numeric column
//! of the same length. Warm-up positions (and positions whose inputs are
//! undefined) hold `f64::NAN`; the frame layer turns those into `None`.
//!
//! Multi-output indicators (MACD, Bollinger, Stochastic, ADX, Keltner,
//! Donchian, Supertrend, Ichimoku) are exposed as separate named instances
//! per output line, keeping the single-series `Indicator` trait unchanged.
//!
//! Grouped by category:
//! - trend: SMA, EMA, MACD, ADX, Ichimoku, Supertrend
//! - momentum: RSI, Stochastic, Williams %R, ROC, Momentum, CCI
//! - volatility: Bollinger, ATR, historical volatility, Keltner, Donchian
//! - volume: OBV, Accumulation/Distribution, MFI

use crate::domain::Bar;

pub mod accumulation_distribution;
pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod donchian;
pub mod ema;
pub mod factory;
pub mod historical_volatility;
pub mod ichimoku;
pub mod keltner;
pub mod macd;
pub mod mfi;
pub mod momentum;
pub mod obv;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod supertrend;
pub mod williams_r;

pub use accumulation_distribution::AccumulationDistribution;
pub use adx::{Adx, AdxLine};
pub use atr::Atr;
pub use bollinger::{Bollinger, BollingerBand};
pub use cci::Cci;
pub use donchian::{Donchian, DonchianBand};
pub use ema::Ema;
pub use factory::build_indicators;
pub use historical_volatility::HistoricalVolatility;
pub use ichimoku::{Ichimoku, IchimokuLine};
pub use keltner::{Keltner, KeltnerBand};
pub use macd::{Macd, MacdLine};
pub use mfi::Mfi;
pub use momentum::Momentum;
pub use obv::Obv;
pub use roc::Roc;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::{Stochastic, StochasticLine};
pub use supertrend::{Supertrend, SupertrendLine};
pub use williams_r::WilliamsR;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. Positions before `lookback()` are `f64::NAN` (warmup).
/// A series shorter than the warm-up yields an all-NaN column, never an
/// empty one.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Column name in the indicator frame (e.g., "SMA_20", "RSI").
    fn name(&self) -> &str;

    /// Index of the first bar that can hold a defined value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

pub(crate) fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

pub(crate) fn highs(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.high).collect()
}

pub(crate) fn lows(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.low).collect()
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close, volume) tuples.
#[cfg(test)]
pub fn make_ohlcv_bars(data: &[(f64, f64, f64, f64, f64)]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close, volume))| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
