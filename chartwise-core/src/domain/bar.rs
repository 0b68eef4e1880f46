//! Bar: the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single trading day.
///
/// `high >= max(open, close)` and `low <= min(open, close)` are assumed of
/// the input; indicators do not enforce them. Use [`Bar::is_sane`] to check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if any OHLCV field is NaN (void bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }

    /// Basic OHLCV sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.volume >= 0.0
    }

    /// Typical price: (high + low + close) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Midpoint of the bar's range: (high + low) / 2.
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}
