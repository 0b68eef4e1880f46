//! Close bouncing off the Bollinger Bands.
//!
//! BUY "BB Lower Band Bounce" when close moves from <= lower band to > lower band.
//! SELL "BB Upper Band Rejection" when close moves from >= upper band to < upper band.

use super::{close_pair, pair, signal_at, SignalRule};
use crate::domain::{Signal, SignalDirection, SignalKind, SignalStrength};
use crate::frame::IndicatorFrame;

const BB_HIGH: &str = "BB_High";
const BB_LOW: &str = "BB_Low";

#[derive(Debug, Clone, Copy, Default)]
pub struct BollingerBounce;

impl SignalRule for BollingerBounce {
    fn name(&self) -> &str {
        "bollinger_bounce"
    }

    fn required_columns(&self) -> Vec<String> {
        vec![BB_HIGH.to_string(), BB_LOW.to_string()]
    }

    fn evaluate(&self, frame: &IndicatorFrame, index: usize) -> Option<Signal> {
        let (close_prev, close_cur) = close_pair(frame, index)?;

        if let Some((low_prev, low_cur)) = pair(frame, BB_LOW, index) {
            if close_prev <= low_prev && close_cur > low_cur {
                return signal_at(
                    frame,
                    index,
                    SignalDirection::Buy,
                    SignalKind::BbLowerBandBounce,
                    SignalStrength::Medium,
                    "Price bounced from lower Bollinger Band",
                );
            }
        }

        if let Some((high_prev, high_cur)) = pair(frame, BB_HIGH, index) {
            if close_prev >= high_prev && close_cur < high_cur {
                return signal_at(
                    frame,
                    index,
                    SignalDirection::Sell,
                    SignalKind::BbUpperBandRejection,
                    SignalStrength::Medium,
                    "Price rejected from upper Bollinger Band",
                );
            }
        }

        None
    }
}
