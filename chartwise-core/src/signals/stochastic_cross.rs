//! Stochastic %K / %D crossover inside the extreme zones.
//!
//! BUY when %K crosses above %D and the new %K is below `oversold`.
//! SELL when %K crosses below %D and the new %K is above `overbought`.

use super::{pair, signal_at, SignalRule};
use crate::domain::{Signal, SignalDirection, SignalKind, SignalStrength};
use crate::frame::IndicatorFrame;

const STOCH_K: &str = "Stoch_K";
const STOCH_D: &str = "Stoch_D";

#[derive(Debug, Clone)]
pub struct StochasticCross {
    oversold: f64,
    overbought: f64,
}

impl StochasticCross {
    pub fn new(oversold: f64, overbought: f64) -> Self {
        Self {
            oversold,
            overbought,
        }
    }
}

impl SignalRule for StochasticCross {
    fn name(&self) -> &str {
        "stochastic_cross"
    }

    fn required_columns(&self) -> Vec<String> {
        vec![STOCH_K.to_string(), STOCH_D.to_string()]
    }

    fn evaluate(&self, frame: &IndicatorFrame, index: usize) -> Option<Signal> {
        let (k_prev, k_cur) = pair(frame, STOCH_K, index)?;
        let (d_prev, d_cur) = pair(frame, STOCH_D, index)?;

        if k_prev <= d_prev && k_cur > d_cur && k_cur < self.oversold {
            return signal_at(
                frame,
                index,
                SignalDirection::Buy,
                SignalKind::StochasticBullishCrossover,
                SignalStrength::Strong,
                "Stochastic %K crossed above %D in oversold region",
            );
        }

        if k_prev >= d_prev && k_cur < d_cur && k_cur > self.overbought {
            return signal_at(
                frame,
                index,
                SignalDirection::Sell,
                SignalKind::StochasticBearishCrossover,
                SignalStrength::Strong,
                "Stochastic %K crossed below %D in overbought region",
            );
        }

        None
    }
}
