//! MACD line crossing its signal line.

use super::{pair, signal_at, SignalRule};
use crate::domain::{Signal, SignalDirection, SignalKind, SignalStrength};
use crate::frame::IndicatorFrame;

const MACD: &str = "MACD";
const MACD_SIGNAL: &str = "MACD_Signal";

#[derive(Debug, Clone, Copy, Default)]
pub struct MacdCross;

impl SignalRule for MacdCross {
    fn name(&self) -> &str {
        "macd_cross"
    }

    fn required_columns(&self) -> Vec<String> {
        vec![MACD.to_string(), MACD_SIGNAL.to_string()]
    }

    fn evaluate(&self, frame: &IndicatorFrame, index: usize) -> Option<Signal> {
        let (macd_prev, macd_cur) = pair(frame, MACD, index)?;
        let (sig_prev, sig_cur) = pair(frame, MACD_SIGNAL, index)?;

        if macd_prev <= sig_prev && macd_cur > sig_cur {
            return signal_at(
                frame,
                index,
                SignalDirection::Buy,
                SignalKind::MacdBullishCrossover,
                SignalStrength::Strong,
                "MACD crossed above signal line",
            );
        }

        if macd_prev >= sig_prev && macd_cur < sig_cur {
            return signal_at(
                frame,
                index,
                SignalDirection::Sell,
                SignalKind::MacdBearishCrossover,
                SignalStrength::Strong,
                "MACD crossed below signal line",
            );
        }

        None
    }
}
