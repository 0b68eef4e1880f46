//! RSI mean reversion out of the oversold / overbought zones.
//!
//! BUY "RSI Oversold Recovery" when RSI moves from <= oversold to > oversold.
//! SELL "RSI Overbought Correction" when RSI moves from >= overbought to < overbought.

use super::{pair, signal_at, SignalRule};
use crate::domain::{Signal, SignalDirection, SignalKind, SignalStrength};
use crate::frame::IndicatorFrame;

const RSI: &str = "RSI";

#[derive(Debug, Clone)]
pub struct RsiReversion {
    oversold: f64,
    overbought: f64,
}

impl RsiReversion {
    pub fn new(oversold: f64, overbought: f64) -> Self {
        Self {
            oversold,
            overbought,
        }
    }
}

impl SignalRule for RsiReversion {
    fn name(&self) -> &str {
        "rsi_reversion"
    }

    fn required_columns(&self) -> Vec<String> {
        vec![RSI.to_string()]
    }

    fn evaluate(&self, frame: &IndicatorFrame, index: usize) -> Option<Signal> {
        let (prev, curr) = pair(frame, RSI, index)?;

        if prev <= self.oversold && curr > self.oversold {
            return signal_at(
                frame,
                index,
                SignalDirection::Buy,
                SignalKind::RsiOversoldRecovery,
                SignalStrength::Medium,
                format!("RSI moved above {} (oversold recovery)", self.oversold),
            );
        }

        if prev >= self.overbought && curr < self.overbought {
            return signal_at(
                frame,
                index,
                SignalDirection::Sell,
                SignalKind::RsiOverboughtCorrection,
                SignalStrength::Medium,
                format!("RSI moved below {} (overbought correction)", self.overbought),
            );
        }

        None
    }
}
