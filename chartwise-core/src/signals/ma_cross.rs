//! Golden cross / death cross on two simple moving averages.
//!
//! BUY "Golden Cross" when the fast SMA moves from <= slow to > slow.
//! SELL "Death Cross" when it moves from >= slow to < slow.

use super::{pair, signal_at, SignalRule};
use crate::domain::{Signal, SignalDirection, SignalKind, SignalStrength};
use crate::frame::IndicatorFrame;

/// Moving average crossover rule.
///
/// # Indicator dependencies
/// - Fast: `SMA_{fast_period}` (e.g., `SMA_20`)
/// - Slow: `SMA_{slow_period}` (e.g., `SMA_50`)
#[derive(Debug, Clone)]
pub struct MaCross {
    fast_period: usize,
    slow_period: usize,
    fast_key: String,
    slow_key: String,
}

impl MaCross {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        assert!(fast_period >= 1, "fast_period must be >= 1");
        assert!(slow_period > fast_period, "slow_period must be > fast_period");
        Self {
            fast_period,
            slow_period,
            fast_key: format!("SMA_{fast_period}"),
            slow_key: format!("SMA_{slow_period}"),
        }
    }
}

impl SignalRule for MaCross {
    fn name(&self) -> &str {
        "ma_cross"
    }

    fn required_columns(&self) -> Vec<String> {
        vec![self.fast_key.clone(), self.slow_key.clone()]
    }

    fn evaluate(&self, frame: &IndicatorFrame, index: usize) -> Option<Signal> {
        let (fast_prev, fast_cur) = pair(frame, &self.fast_key, index)?;
        let (slow_prev, slow_cur) = pair(frame, &self.slow_key, index)?;

        if fast_prev <= slow_prev && fast_cur > slow_cur {
            return signal_at(
                frame,
                index,
                SignalDirection::Buy,
                SignalKind::GoldenCross,
                SignalStrength::Strong,
                format!(
                    "SMA {} crossed above SMA {}",
                    self.fast_period, self.slow_period
                ),
            );
        }

        if fast_prev >= slow_prev && fast_cur < slow_cur {
            return signal_at(
                frame,
                index,
                SignalDirection::Sell,
                SignalKind::DeathCross,
                SignalStrength::Strong,
                format!(
                    "SMA {} crossed below SMA {}",
                    self.fast_period, self.slow_period
                ),
            );
        }

        None
    }
}
