//! Signal: an immutable, dated trading event emitted by a signal rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional intent of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalDirection {
    Buy,
    Sell,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Declared confidence tier of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStrength {
    Weak,
    Medium,
    Strong,
}

impl SignalStrength {
    /// Score weight used by the recommendation aggregator.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Strong => 2.0,
            Self::Medium => 1.0,
            Self::Weak => 0.5,
        }
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => write!(f, "WEAK"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Strong => write!(f, "STRONG"),
        }
    }
}

/// The named rule that produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    #[serde(rename = "Golden Cross")]
    GoldenCross,
    #[serde(rename = "Death Cross")]
    DeathCross,
    #[serde(rename = "RSI Oversold Recovery")]
    RsiOversoldRecovery,
    #[serde(rename = "RSI Overbought Correction")]
    RsiOverboughtCorrection,
    #[serde(rename = "MACD Bullish Crossover")]
    MacdBullishCrossover,
    #[serde(rename = "MACD Bearish Crossover")]
    MacdBearishCrossover,
    #[serde(rename = "BB Lower Band Bounce")]
    BbLowerBandBounce,
    #[serde(rename = "BB Upper Band Rejection")]
    BbUpperBandRejection,
    #[serde(rename = "Stochastic Bullish Crossover")]
    StochasticBullishCrossover,
    #[serde(rename = "Stochastic Bearish Crossover")]
    StochasticBearishCrossover,
    #[serde(rename = "Strong Uptrend Emerging")]
    StrongUptrendEmerging,
    #[serde(rename = "Strong Downtrend Emerging")]
    StrongDowntrendEmerging,
}

impl SignalKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::GoldenCross => "Golden Cross",
            Self::DeathCross => "Death Cross",
            Self::RsiOversoldRecovery => "RSI Oversold Recovery",
            Self::RsiOverboughtCorrection => "RSI Overbought Correction",
            Self::MacdBullishCrossover => "MACD Bullish Crossover",
            Self::MacdBearishCrossover => "MACD Bearish Crossover",
            Self::BbLowerBandBounce => "BB Lower Band Bounce",
            Self::BbUpperBandRejection => "BB Upper Band Rejection",
            Self::StochasticBullishCrossover => "Stochastic Bullish Crossover",
            Self::StochasticBearishCrossover => "Stochastic Bearish Crossover",
            Self::StrongUptrendEmerging => "Strong Uptrend Emerging",
            Self::StrongDowntrendEmerging => "Strong Downtrend Emerging",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A trading event detected at `bar_index` of an indicator frame.
///
/// Signals describe a market event, not a decision: they carry the close at
/// the bar where the transition completed and nothing about positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub bar_index: usize,
    pub date: NaiveDate,
    pub direction: SignalDirection,
    pub kind: SignalKind,
    pub description: String,
    pub strength: SignalStrength,
    pub price: f64,
}

impl Signal {
    /// Direction-signed score contribution: `+multiplier` for BUY, `-multiplier` for SELL.
    pub fn signed_weight(&self) -> f64 {
        match self.direction {
            SignalDirection::Buy => self.strength.multiplier(),
            SignalDirection::Sell => -self.strength.multiplier(),
        }
    }
}
