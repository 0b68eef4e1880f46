//! Trend-strength emergence: ADX crossing above its threshold.
//!
//! Fires only on the crossing bar (previous ADX <= threshold, current ADX >
//! threshold), in the direction of the dominant directional indicator, and
//! only when that DI is itself above the threshold.

use super::{pair, signal_at, SignalRule};
use crate::domain::{Signal, SignalDirection, SignalKind, SignalStrength};
use crate::frame::IndicatorFrame;

const ADX: &str = "ADX";
const ADX_POS: &str = "ADX_Pos";
const ADX_NEG: &str = "ADX_Neg";

#[derive(Debug, Clone)]
pub struct TrendStrength {
    threshold: f64,
}

impl TrendStrength {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl SignalRule for TrendStrength {
    fn name(&self) -> &str {
        "trend_strength"
    }

    fn required_columns(&self) -> Vec<String> {
        vec![ADX.to_string(), ADX_POS.to_string(), ADX_NEG.to_string()]
    }

    fn evaluate(&self, frame: &IndicatorFrame, index: usize) -> Option<Signal> {
        let (adx_prev, adx_cur) = pair(frame, ADX, index)?;
        if !(adx_prev <= self.threshold && adx_cur > self.threshold) {
            return None;
        }

        let plus_di = frame.value(ADX_POS, index)?;
        let minus_di = frame.value(ADX_NEG, index)?;

        if plus_di > minus_di && plus_di > self.threshold {
            return signal_at(
                frame,
                index,
                SignalDirection::Buy,
                SignalKind::StrongUptrendEmerging,
                SignalStrength::Strong,
                "ADX indicates strong uptrend forming",
            );
        }

        if minus_di > plus_di && minus_di > self.threshold {
            return signal_at(
                frame,
                index,
                SignalDirection::Sell,
                SignalKind::StrongDowntrendEmerging,
                SignalStrength::Strong,
                "ADX indicates strong downtrend forming",
            );
        }

        None
    }
}
